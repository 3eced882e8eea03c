//! End-to-end checks of the core against the in-memory parameter store.

#[cfg(test)]
mod catalog {
    mod integration;
}

#[cfg(test)]
mod discovery {
    mod integration;
}
