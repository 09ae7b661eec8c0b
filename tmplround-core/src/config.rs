// Names of the runtime functions each backend's generated code calls
//
// Defaults match the stock JavaScript and Python runtimes. A host compiler that
// ships its own runtime library injects a different EmitConfig.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsSrcConfig {
    pub round_fn: String,
    pub pow_fn: String,
}

impl Default for JsSrcConfig {
    fn default() -> Self {
        Self {
            round_fn: "Math.round".to_string(),
            pow_fn: "Math.pow".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PySrcConfig {
    // helper(value, digits): collapses to int when digits <= 0
    pub simplify_num_fn: String,
    pub round_fn: String,
    pub frexp_fn: String,
    pub epsilon: String,
}

impl Default for PySrcConfig {
    fn default() -> Self {
        Self {
            simplify_num_fn: "runtime.simplify_num".to_string(),
            round_fn: "round".to_string(),
            frexp_fn: "math.frexp".to_string(),
            epsilon: "sys.float_info.epsilon".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitConfig {
    pub js: JsSrcConfig,
    pub py: PySrcConfig,
}
