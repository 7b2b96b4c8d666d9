//! Core-timer support for PIC32MX microcontrollers
//!
//! The PIC32MX core timer is the MIPS CP0 Count register: a free-running 32-bit
//! counter incrementing once for every two SYSCLK cycles. This crate wraps it in
//! a tick library with wraparound-safe elapsed-time arithmetic and blocking
//! delays, implemented against the
//! [`embedded-hal`](https://crates.io/crates/embedded-hal) traits, together with
//! the small board utilities the counter is typically paired with (heartbeat
//! LED, PWM tone output, a core-timer-free spin delay).
//!
//! All timing arithmetic goes through the [`count::CountRegister`] seam, so it
//! runs unchanged against a simulated counter on the host. The hardware counter
//! itself (`count::CoreCount`) is only available when building for a bare-metal
//! MIPS target.
//!
//! # Crate features
//!
//! * **critical-section-impl** -
//!   critical section for the single-core PIC32MX, masking interrupts via the
//!   CP0 Status IE bit
//! * **defmt** -
//!   Implement `defmt::Format` for several types.

#![cfg_attr(
    all(target_arch = "mips", target_os = "none"),
    feature(asm_experimental_arch)
)]
#![warn(missing_docs)]
#![no_std]

pub mod arch;
pub mod board;
pub mod count;
#[cfg(all(
    feature = "critical-section-impl",
    target_arch = "mips",
    target_os = "none"
))]
mod critical_section_impl;
pub mod heartbeat;
pub mod tick;
pub mod tone;
pub mod util;

pub use board::Board;
pub use count::CountRegister;
pub use tick::{TickStamp, Ticker};
