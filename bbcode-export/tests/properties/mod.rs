//! Properties checked over generated documents.

mod balance;
