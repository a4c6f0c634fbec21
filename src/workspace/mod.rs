//! Content-addressed workspace management

pub mod cache;
pub mod store;

pub use cache::{Workspace, WorkspaceCache};
pub use store::{WorkspaceEntry, WorkspaceStore};

/// Well-known file names the pipeline writes into a workspace
pub mod outputs {
    /// Decompiled C# dump from Il2CppDumper
    pub const DUMP_CS: &str = "dump.cs";
    /// Raw IL2CPP header from Il2CppDumper
    pub const IL2CPP_HEADER: &str = "il2cpp.h";
    /// Symbol script consumed by the Ghidra post-script
    pub const SCRIPT_JSON: &str = "script.json";
    /// Ghidra-parseable header produced by the conversion script
    pub const GHIDRA_HEADER: &str = "il2cpp_ghidra.h";
    /// Extension of the Ghidra project file
    pub const PROJECT_EXT: &str = "gpr";
}
