pub use kernel::id::PostId;
