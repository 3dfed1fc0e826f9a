//! Domain logic for the magazine content portal.
//!
//! Pure, I/O-free building blocks shared by the HTTP client and the CLI:
//!
//! - [`crossword`] and [`horoscope`] model the generated content and the
//!   request parameters sent to the backend.
//! - [`lifecycle`] tracks the generate-then-export state of a page.
//! - [`export`] serializes generated content into XML documents for desktop
//!   publishing tools, using the escaper in [`xml`].

pub mod crossword;
pub mod error;
pub mod export;
pub mod horoscope;
pub mod lifecycle;
pub mod types;
pub mod xml;
