use shop_capacity::input::toml_input::{Loads, Settings};
use shop_capacity::input::Config;

/// Asserts that two hour values are equal up to rounding noise.
#[allow(unused_macros)]
macro_rules! assert_hours {
    ($left:expr, $right:expr $(,)?) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < 1e-6,
            "hours differ: {} != {}",
            left,
            right
        );
    }};
}

#[must_use]
#[allow(dead_code)]
pub fn make_config(calendar: &str, loads: &str) -> Config {
    let settings: Settings = toml::from_str(calendar).expect("calendar toml should be valid");
    let loads: Loads = toml::from_str(loads).expect("loads toml should be valid");

    Config::try_from_toml(settings, loads)
        .build()
        .expect("config should be valid")
}

#[allow(dead_code)]
pub fn make_calendar(daily_capacity: f64) -> String {
    format!(
        concat!(
            //
            "[calendar]\n",
            "working_days = [\"monday\", \"tuesday\", \"wednesday\", \"thursday\", \"friday\"]\n",
            "holidays = [\"2024-03-29\", \"2024-04-01\"]\n",
            "daily_capacity = {daily_capacity:.1}\n",
            "\n",
            "[forecast]\n",
            "weeks = 4\n",
            "under_utilization = 0.7\n",
        ),
        daily_capacity = daily_capacity
    )
}

#[allow(dead_code)]
pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
