#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! The atomically-swapped route table and the policy-chain resource
//! handler that fills it (§4.5, §5, components E and G).

mod error;
mod handler;
mod route_table;

pub use error::{KernelError, KernelResult};
pub use handler::PolicyChainResourceHandler;
pub use route_table::Kernel;
