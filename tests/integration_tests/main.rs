#[cfg(feature = "cli")]
mod cmdline;
mod document;
mod editing;
mod error_handling;
mod roundtrip;
mod tessellate;
