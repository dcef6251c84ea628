//! # odastatus
//!
//! Request info about [Odamex](https://odamex.net) game servers.
//!
//! A query is one UDP exchange: the 4 byte launcher challenge goes out,
//! the server answers with a single binary datagram and [`ServerInfo::parse`]
//! walks it field by field into a [`ServerInfo`].
//!
//! Example
//! ```rust,no_run
//! use odastatus::*;
//!
//! env_logger::init();
//! let addr = ServerAddr::from_oda_uri("odamex://doom.example.org:10666")
//!     .expect("can't parse link");
//! let info = ServerInfo::query(&addr).expect("query failed");
//! println!("info: {:#?}", info);
//! ```

pub mod errors;

mod common;
mod decoder;
mod server;
mod uri;
mod util;

pub use common::*;
pub use decoder::*;
pub use server::*;
pub use uri::*;
pub use util::*;
