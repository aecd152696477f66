//! In-memory character device objects
//!
//! A device here is a fixed-capacity byte buffer answering the
//! conventional open/read/write/seek/release calls. The registration
//! layer that binds devices to an operating system (device numbers,
//! nodes, user-memory marshalling) lives outside this crate and
//! dispatches into [`fs::CharDev`].

#![no_std]
#![deny(warnings, unsafe_code, unused_must_use, unreachable_patterns)]

extern crate alloc;

#[macro_use]
extern crate log;

// layer 0
pub mod error;

// layer 1
pub mod fs;
