//! Learning agents: the value bank (state values, explore/exploit policy,
//! credit assignment) and the agent wrapper that owns one.

mod agent;
mod value_bank;

pub use agent::Agent;
pub use value_bank::{ValueBank, DEFAULT_VALUE};
