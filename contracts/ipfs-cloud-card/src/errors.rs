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
    /// Indicates a non-existent `token_id`.
    NonExistentToken = 4,
    /// Transfer/burn/approve attempted by neither owner nor approved spender.
    NotOwnerOrApproved = 5,
    /// Enumeration index past the end.
    IndexOutOfBounds = 6,
    /// Batch mint of zero tokens.
    InvalidAmount = 7,
    /// Collection metadata queried before the constructor set it.
    UnsetMetadata = 8,
    /// Indicates overflow when adding two values.
    MathOverflow = 9,
}
