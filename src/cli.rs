use crate::batch;
use crate::config::{self, BatchSettings, Command, Config, FilterChoice,
                    SweepSettings};
use crate::error::{Error, Result};
use crate::io;
use crate::plot;
use crate::sweep::{self, SweepConfig};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

fn filter_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(Arg::with_name("fir")
            .long("fir")
            .value_name("FILE")
            .help("FIR coefficients, raw little-endian f32")
            .takes_value(true)
            .conflicts_with("iir")
            .requires("taps"))
        .arg(Arg::with_name("taps")
             .long("taps")
             .value_name("N")
             .help("number of FIR coefficients to read")
             .takes_value(true))
        .arg(Arg::with_name("iir")
             .long("iir")
             .value_name("CUTOFF")
             .help("first-order IIR low-pass with this cutoff [default: 0.0026]")
             .takes_value(true))
        .arg(Arg::with_name("rate")
             .short("r")
             .long("rate")
             .value_name("RATE")
             .help("sample rate")
             .takes_value(true)
             .default_value("1.0"))
        .arg(Arg::with_name("output-dir")
             .short("o")
             .long("output-dir")
             .value_name("DIR")
             .help("where result files go")
             .takes_value(true)
             .default_value("output"))
}

pub fn setup<'a, 'b>() -> App<'a, 'b> {
    let sweep = SubCommand::with_name("sweep")
        .about("measure the filter's response to a sweep of sine tones")
        .arg(Arg::with_name("start")
             .long("start")
             .value_name("FREQ")
             .takes_value(true)
             .default_value("0.0002"))
        .arg(Arg::with_name("stop")
             .long("stop")
             .value_name("FREQ")
             .takes_value(true)
             .default_value("0.01"))
        .arg(Arg::with_name("step")
             .long("step")
             .value_name("FREQ")
             .takes_value(true)
             .default_value("0.00001"))
        .arg(Arg::with_name("length")
             .short("l")
             .long("length")
             .value_name("SAMPLES")
             .help("test tone length")
             .takes_value(true)
             .default_value("2000"))
        .arg(Arg::with_name("amplitude")
             .long("amplitude")
             .value_name("AMPLITUDE")
             .takes_value(true)
             .default_value("1.0"))
        .arg(Arg::with_name("threshold")
             .long("threshold")
             .value_name("DB")
             .help("level that marks the bandwidth")
             .takes_value(true)
             .allow_hyphen_values(true)
             .default_value("-3.0"))
        .arg(Arg::with_name("plot")
             .short("p")
             .long("plot")
             .value_name("FILE")
             .help("Write a plot of the response to a file.")
             .takes_value(true));

    let batch = SubCommand::with_name("batch")
        .about("filter a whole signal file")
        .arg(Arg::with_name("INPUT")
             .required(true)
             .help("raw little-endian f32 samples, or a wav file with --wav")
             .index(1))
        .arg(Arg::with_name("count")
             .short("n")
             .long("count")
             .value_name("SAMPLES")
             .help("samples to read; the whole file if not given")
             .takes_value(true))
        .arg(Arg::with_name("wav")
             .long("wav")
             .help("read INPUT as mono wav")
             .conflicts_with("count"))
        .arg(Arg::with_name("echo")
             .long("echo")
             .help("also write the input signal as text"))
        .arg(Arg::with_name("plot")
             .short("p")
             .long("plot")
             .value_name("FILE")
             .help("Write a plot of the filtered signal to a file.")
             .takes_value(true))
        .arg(Arg::with_name("plot-span")
             .long("plot-span")
             .value_name("SECONDS")
             .help("only plot this much of the start of the signal")
             .takes_value(true)
             .requires("plot"));

    App::new("filtresp")
        .about("frequency response of FIR and IIR filters")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(Arg::with_name("verbose")
             .short("v")
             .long("verbose")
             .multiple(true)
             .help("log more; repeat for trace output"))
        .subcommand(filter_args(sweep))
        .subcommand(filter_args(batch))
}

fn parse<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match matches.value_of(name) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|e| {
            Error::Config(format!("bad --{} {:?}: {}", name, text, e))
        }),
    }
}

fn required<T>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse(matches, name)?
        .ok_or_else(|| Error::Config(format!("--{} is required", name)))
}

fn filter_choice(matches: &ArgMatches) -> Result<FilterChoice> {
    if let Some(path) = matches.value_of("fir") {
        Ok(FilterChoice::Fir {
            path: PathBuf::from(path),
            taps: required(matches, "taps")?,
        })
    } else {
        Ok(FilterChoice::Iir {
            cutoff: parse(matches, "iir")?.unwrap_or(config::DEFAULT_CUTOFF),
        })
    }
}

/// Turn parsed arguments into a run configuration.
pub fn config(matches: &ArgMatches) -> Result<Config> {
    let (name, sub) = matches.subcommand();
    let sub = sub.ok_or_else(|| Error::Config("no command given".to_owned()))?;

    let command = match name {
        "sweep" => Command::Sweep(SweepSettings {
            range: SweepConfig::new(required(sub, "start")?,
                                    required(sub, "stop")?,
                                    required(sub, "step")?)?,
            length: required(sub, "length")?,
            amplitude: required(sub, "amplitude")?,
            threshold: required(sub, "threshold")?,
            plot: sub.value_of("plot").map(PathBuf::from),
        }),
        "batch" => Command::Batch(BatchSettings {
            input: PathBuf::from(required::<String>(sub, "INPUT")?),
            count: parse(sub, "count")?,
            wav: sub.is_present("wav"),
            echo: sub.is_present("echo"),
            plot: sub.value_of("plot").map(PathBuf::from),
            plot_span: parse(sub, "plot-span")?,
        }),
        other => {
            return Err(Error::Config(format!("unknown command {:?}", other)));
        },
    };

    let rate: f64 = required(sub, "rate")?;
    if !(rate > 0.0 && rate.is_finite()) {
        return Err(Error::Config(format!("rate must be positive, got {}", rate)));
    }

    Ok(Config {
        filter: filter_choice(sub)?,
        rate,
        output_dir: PathBuf::from(required::<String>(sub, "output-dir")?),
        command,
    })
}

fn run_sweep(config: &Config, settings: &SweepSettings) -> Result<()> {
    let filter = config.filter.build(config.rate)?;
    let response = sweep::sweep(&filter, &settings.range, settings.length,
                                settings.amplitude, config.rate);

    let kind = config.filter.kind();
    let out = |suffix: &str| config.output_dir.join(format!("{}_{}", kind, suffix));
    io::write_series(out("amplitude.csv"), &response.amplitudes())?;
    io::write_series(out("frequency.csv"), &response.frequencies())?;
    io::write_pairs(out("response.csv"), &response)?;

    let bandwidth = response.bandwidth(settings.threshold);
    match bandwidth {
        Some(f) => info!("bandwidth frequency: {:.4}", f),
        None => info!("response never falls to {} dB", settings.threshold),
    }

    if let Some(path) = &settings.plot {
        plot::response(path, &response, settings.threshold)?;
        info!(path = %path.display(), "plotted");
    }
    Ok(())
}

fn run_batch(config: &Config, settings: &BatchSettings) -> Result<()> {
    let signal = if settings.wav {
        io::load_wav(&settings.input)?
    } else if let Some(count) = settings.count {
        io::load_buffer(&settings.input, count, config.rate)?
    } else {
        io::load_all(&settings.input, config.rate)?
    };

    // a wav header may carry its own rate
    let filter = config.filter.build(signal.rate())?;
    let output = batch::run(&filter, &signal);

    let kind = config.filter.kind();
    io::write_series(config.output_dir.join(format!("{}_filtered.csv", kind)),
                     &output)?;
    if settings.echo {
        io::write_series(config.output_dir.join("signal.csv"), &signal)?;
    }
    if let Some(path) = &settings.plot {
        plot::trace(path, &output, settings.plot_span)?;
        info!(path = %path.display(), "plotted");
    }
    Ok(())
}

/// Carry out the configured command, writing results under the output
/// directory.
pub fn run(config: &Config) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir).map_err(|source| {
        Error::SinkUnavailable {
            path: config.output_dir.clone(),
            source,
        }
    })?;

    match &config.command {
        Command::Sweep(settings) => run_sweep(config, settings),
        Command::Batch(settings) => run_batch(config, settings),
    }
}
