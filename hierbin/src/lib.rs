#[cfg(feature = "core")]
#[doc(inline)]
pub use hierbin_core as core;

#[cfg(feature = "index")]
#[doc(inline)]
pub use hierbin_index as index;
