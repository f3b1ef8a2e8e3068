/// Non-negative money type used for balances and amounts.
pub mod money;

/// The account entity. Operations validate into a transaction record first,
/// then apply the record to the balance.
pub mod account;

/// Kind-specific rules: checking withdrawal limit, savings interest.
pub mod policy;

/// Immutable record emitted by every completed balance mutation.
pub mod transaction;

/// Moving money between two accounts as one unit, with or without locking.
pub mod transfer;

/// Turns loose input fields into typed commands for [`processor`].
pub mod command;

/// Storage and history contracts the core is driven through, plus an
/// "in memory" implementation of them.
pub mod processor;

/// Defaults for newly opened accounts, read from the environment.
pub mod config;

/// CSV driver around [`processor`]. Kept in the library so integration tests
/// can run it.
pub mod bin_utils;
