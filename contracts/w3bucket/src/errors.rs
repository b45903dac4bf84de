use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Caller does not hold the role required for the operation.
    Unauthorized = 1,
    /// Mutating call arrived while the contract is paused.
    ContractPaused = 2,
    /// Redundant pause/unpause transition.
    InvalidPauseState = 3,
    /// Unknown or inactive edition referenced by mint.
    InvalidEdition = 4,
    /// Price update for an edition id that was never created.
    UnknownEdition = 5,
    /// No price configured for the (edition, currency) pair.
    InvalidCurrency = 6,
    /// Edition reached its max mintable supply.
    SupplyExceeded = 7,
    /// Offered payment does not exactly match the configured price.
    /// Balance/allowance shortfalls surface as errors propagated from
    /// the currency's token contract instead.
    InsufficientPayment = 8,
    /// Indicates a non-existent `token_id`.
    NonExistentToken = 9,
    /// Transfer/burn/approve attempted by neither owner nor approved spender.
    NotOwnerOrApproved = 10,
    /// Enumeration index past the end.
    IndexOutOfBounds = 11,
    /// Indicates overflow when adding two values.
    MathOverflow = 12,
    /// Collection metadata queried before the constructor set it.
    UnsetMetadata = 13,
    /// Negative price submitted for an (edition, currency) pair.
    InvalidPrice = 14,
}
