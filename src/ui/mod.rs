pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{empty, header, info, success, warn, word_added};
pub use table::{stats_table, words_table};
pub use theme::{theme, Theme};
