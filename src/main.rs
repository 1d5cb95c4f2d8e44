use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use log::{error, info};
use seahorse::{App, Command, Context, Flag, FlagType};

use shop_capacity::input::Config;
use shop_capacity::scheduler::{AllocationEngine, Allocator};
use shop_capacity::time::Date;
use shop_capacity::{forecast, AllocationReport, ForecastReport};

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    run();
}

/// Commands only take plain function pointers, so every action goes through
/// this to report its error.
fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

mod seahorse_exts {
    use std::path::PathBuf;

    use anyhow::Context as _;
    use seahorse::Context;

    pub trait ContextExt {
        fn context(&self) -> &Context;

        fn required_string_flag(&self, name: &str) -> Result<String, anyhow::Error> {
            self.context()
                .string_flag(name)
                .ok()
                .with_context(|| anyhow::anyhow!("missing required flag \"{}\"", name))
        }

        fn required_path_flag(&self, name: &str) -> Result<PathBuf, anyhow::Error> {
            self.required_string_flag(name).map(PathBuf::from)
        }

        /// Parses an optional flag, failing only if it is present but malformed.
        fn parsed_flag<T>(&self, name: &str) -> Result<Option<T>, anyhow::Error>
        where
            T: std::str::FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            self.context()
                .string_flag(name)
                .ok()
                .map(|value| {
                    value.parse::<T>().with_context(|| {
                        format!("invalid value \"{}\" for flag \"{}\"", value, name)
                    })
                })
                .transpose()
        }
    }

    impl ContextExt for Context {
        fn context(&self) -> &Context {
            self
        }
    }
}

use seahorse_exts::ContextExt;

fn input_flags(command: Command) -> Command {
    command
        .flag(
            Flag::new("calendar", FlagType::String)
                .description("Path to the calendar settings (toml)."),
        )
        .flag(Flag::new("loads", FlagType::String).description("Path to the loads (toml)."))
}

fn build_config(context: &Context) -> anyhow::Result<Config> {
    let calendar = context.required_path_flag("calendar")?;
    let loads = context.required_path_flag("loads")?;

    let mut builder = Config::try_from_toml_files(&calendar, &loads)?;

    if let Some(start) = context.parsed_flag::<Date>("start")? {
        builder.start_week(start);
    }

    if let Some(weeks) = context.parsed_flag::<usize>("weeks")? {
        builder.weeks(weeks);
    }

    if let Some(threshold) = context.parsed_flag::<f64>("threshold")? {
        builder.under_utilization(threshold);
    }

    if let Ok(output) = context.required_path_flag("output") {
        builder.output(resolve_output(&loads, output)?);
    }

    let config = builder.build()?;

    info!("finished building config");

    Ok(config)
}

/// Relative output paths are resolved against the directory of the loads file.
fn resolve_output(loads: &Path, output: PathBuf) -> anyhow::Result<PathBuf> {
    if output.is_absolute() {
        return Ok(output);
    }

    let workspace = dunce::canonicalize(loads)
        .with_context(|| format!("failed to resolve `{}`", loads.display()))?
        .parent()
        .ok_or_else(|| anyhow::anyhow!("loads should have a parent directory"))?
        .to_path_buf();

    Ok(workspace.join(output))
}

fn print_or_write(config: &Config, contents: &str) -> anyhow::Result<()> {
    match config.output() {
        Some(output) => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(output, contents)
                .with_context(|| format!("failed to write `{}`", output.display()))?;
            info!("wrote {}", output.display());
        }
        None => println!("{}", contents),
    }

    Ok(())
}

fn run_forecast(context: &Context) -> anyhow::Result<()> {
    let config = build_config(context)?;
    let forecast = forecast(&config);

    let contents = if context.bool_flag("json") {
        serde_json::to_string_pretty(&forecast)?
    } else {
        ForecastReport::new(&forecast)
            .with_breakdown(!context.bool_flag("no-breakdown"))
            .to_string()
    };

    print_or_write(&config, &contents)
}

fn run_allocate(context: &Context) -> anyhow::Result<()> {
    let config = build_config(context)?;

    if context.args.len() != 1 {
        return Err(anyhow::anyhow!("missing load id or too many arguments"));
    }

    let id = &context.args[0];
    let load = config
        .load(id)
        .ok_or_else(|| anyhow::anyhow!("there is no load with the id \"{}\"", id))?;

    let allocation = AllocationEngine::new(config.calendar(), *config.options()).allocate(load);

    let contents = if context.bool_flag("json") {
        serde_json::to_string_pretty(&allocation)?
    } else {
        AllocationReport::new(load, &allocation).to_string()
    };

    print_or_write(&config, &contents)
}

fn run() {
    let args: Vec<String> = env::args().collect();

    let forecast_command = input_flags(
        Command::new("forecast")
            .usage(format!("{} forecast [args]", args[0]))
            .description("Schedules all loads and prints the weekly utilization."),
    )
    .flag(
        Flag::new("start", FlagType::String)
            .description(
                "[optional] The first week of the forecast (YYYY-MM-DD). \
                 Default: the week of the earliest load",
            ),
    )
    .flag(
        Flag::new("weeks", FlagType::String)
            .description(
                "[optional] The number of weeks. Default: `forecast.weeks` of the calendar",
            ),
    )
    .flag(
        Flag::new("threshold", FlagType::String)
            .description("[optional] Weeks below this utilization are under-utilized (0 to 1)."),
    )
    .flag(Flag::new("json", FlagType::Bool).description("[optional] Prints the forecast as json."))
    .flag(
        Flag::new("no-breakdown", FlagType::Bool)
            .description("[optional] Hides the hours per load in each week."),
    )
    .flag(
        Flag::new("output", FlagType::String)
            .description("[optional] Writes the result to this file instead of printing it."),
    )
    .action(|context| exit_on_error(run_forecast(context)));

    let allocate_command = input_flags(
        Command::new("allocate")
            .usage(format!("{} allocate [args] <load-id>", args[0]))
            .description("Prints the hours of a single load on each day."),
    )
    .flag(
        Flag::new("json", FlagType::Bool).description("[optional] Prints the allocation as json."),
    )
    .flag(
        Flag::new("output", FlagType::String)
            .description("[optional] Writes the result to this file instead of printing it."),
    )
    .action(|context| exit_on_error(run_allocate(context)));

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [args]", args[0]))
        .command(forecast_command)
        .command(allocate_command);

    app.run(args);
}
