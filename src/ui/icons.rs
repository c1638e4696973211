pub struct Icons;

impl Icons {
    pub const CLOUD: &str = "☁️";
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const NEW: &str = "✨";
    pub const DEL: &str = "🗑️";
    pub const EMPTY: &str = "∅";
}
