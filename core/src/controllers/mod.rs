pub mod monitor_logic;
pub mod normalize_logic;
