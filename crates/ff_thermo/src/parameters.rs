/// Parameter set shipped with the crate: Xia et al. (1998) Watson-Crick
/// stacks with their helix initiation, symmetry and terminal A·U terms.
pub const DEFAULT_PARAMETER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/params");

pub const STACK_DH_FILE: &str = "stack.dh";
pub const STACK_DS_FILE: &str = "stack.ds";
pub const HELIX_FILE: &str = "helix.dat";
