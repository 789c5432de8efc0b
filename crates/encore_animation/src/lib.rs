//! Encore Animation System
//!
//! Spring physics driving smooth scrolling.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Smooth Scroll**: clamped, interruptible scroll animations stepped by the host frame clock

pub mod scroll;
pub mod spring;

pub use scroll::{ScrollAnimation, ScrollBehavior};
pub use spring::{Spring, SpringConfig};
