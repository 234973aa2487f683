//! Throttled service restart pipeline.
//!
//! Change signals land in the [`ThrottledActuator`], which rate-limits real
//! restart attempts and hands them to a [`Restarter`].

pub mod invoker;
pub mod throttle;

pub use invoker::{Restarter, SystemctlRestarter};
pub use throttle::ThrottledActuator;
