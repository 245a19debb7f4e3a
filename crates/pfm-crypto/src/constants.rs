//! Cryptographic constants.

/// Argon2id parameters for password hashing
pub mod argon2_params {
    use argon2::{Params, Version};

    /// Argon2 version used for all password hashes
    pub const VERSION: Version = Version::V0x13;

    /// Memory cost in KiB (64 MiB)
    pub const M_COST: u32 = 65536;

    /// Iteration count
    pub const T_COST: u32 = 3;

    /// Degree of parallelism
    pub const P_COST: u32 = 1;

    /// Build the Argon2 parameter set
    pub fn get_params() -> Params {
        Params::new(M_COST, T_COST, P_COST, None).expect("Argon2 parameters are within bounds")
    }
}
