//! Network acquisition components, leaves first.
//!
//! | Component              | Does                                        |
//! |------------------------|---------------------------------------------|
//! | `info::NetworkInfoQuery`      | Reads the local identity once associated |
//! | `scanner::NetworkScanner`     | Looks for the target in one scan        |
//! | `negotiator::ConnectionNegotiator` | Bounded associate-and-wait loop    |
//!
//! All three are stateless between calls.  Whatever they observe during a
//! call (scan list, attempt count, local address) is returned to the
//! caller rather than kept.

pub mod info;
pub mod negotiator;
pub mod scanner;
