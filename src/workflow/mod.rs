pub mod stem_ctx;
pub mod stem_flow;

pub use stem_ctx::StemCtx;
pub use stem_flow::StemFlow;
