use filtresp::config::{BatchSettings, Command, Config, FilterChoice, SweepSettings};
use filtresp::filter::Identity;
use filtresp::signal::{self, Signal};
use filtresp::sweep::{decibels, peak, sweep};
use filtresp::*;

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::{self, File};
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("filtresp-it-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_raw(path: &PathBuf, values: &[f32]) {
    let mut file = File::create(path).unwrap();
    for &v in values {
        file.write_f32::<LittleEndian>(v).unwrap();
    }
}

#[test]
fn fir_impulse_response() {
    let coef = vec![0.3, 0.2, -0.1, 0.05, 0.01];
    let fir = Fir::new(coef.clone());
    let impulse: Buffer<f64> = signal::impulse(1.0).take_samples(12).collect();
    let out = fir.process(&impulse);
    for k in 0..out.len() {
        let want = if k < coef.len() { coef[k] } else { 0.0 };
        assert_eq!(out[k], want);
    }
}

#[test]
fn identity_fir_end_to_end() {
    let tone = signal::generate(0.1, 1.0, 1.0, 2000);
    assert_eq!(tone[0], 0.0);
    let out = Fir::new(vec![1.0, 0.0, 0.0]).process(&tone);
    assert_eq!(out, tone);

    // 0.1 cycles per sample never lands on the crest
    let crest = (0.4 * std::f64::consts::PI).sin();
    assert!((peak(&out) - crest).abs() < 1e-12);

    // 0.25 cycles per sample does
    let tone = signal::generate(0.25, 1.0, 1.0, 2000);
    let out = Fir::new(vec![1.0]).process(&tone);
    assert!((peak(&out) - 1.0).abs() < 1e-12);
    assert!(decibels(peak(&out)).abs() < 1e-9);
}

#[test]
fn iir_dc_gain() {
    for &cutoff in &[0.0026, 0.01, 0.1] {
        let iir = Iir::lowpass(cutoff, 1.0);
        let c = iir.coefficients();
        let out = iir.process(&signal::constant(1.0, -4.0).take_samples(5000).collect());
        let want = -4.0 * (c.b0 + c.b1) / (1.0 + c.a1);
        assert!((out[4999] - want).abs() < 1e-9, "cutoff {}", cutoff);
    }
}

#[test]
fn sweep_order_and_length() {
    let config = SweepConfig::new(0.001, 0.005, 0.001).unwrap();
    let response = sweep(&Iir::lowpass(0.0026, 1.0), &config, 2000, 1.0, 1.0);
    let f = response.frequencies();
    let want = [0.001, 0.002, 0.003, 0.004, 0.005];
    assert_eq!(f.len(), want.len());
    for (got, want) in f.iter().zip(want.iter()) {
        assert!((got - want).abs() < 1e-15);
    }
}

#[test]
fn lowpass_falls_with_frequency() {
    let config = SweepConfig::default();
    let response = sweep(&Iir::lowpass(0.0026, 1.0), &config, 2000, 1.0, 1.0);
    assert_eq!(response.len(), 981);
    let db = response.amplitudes();
    assert!(db[0] > db[db.len() - 1]);
    // the whole curve sits near -30 dB, so the first point already qualifies
    assert!(db.iter().all(|&v| v < -3.0));
    assert_eq!(response.bandwidth(-3.0), Some(response.frequencies()[0]));
    assert_eq!(response.bandwidth(-40.0), None);
}

#[test]
fn two_tap_average_crosses_three_db() {
    // gain |cos(pi f)| reaches -3 dB just below f = 0.25
    let average = Fir::new(vec![0.5, 0.5]);
    let config = SweepConfig::new(0.20, 0.30, 0.01).unwrap();
    let response = sweep(&average, &config, 2000, 1.0, 1.0);
    let bandwidth = response.bandwidth(-3.0).unwrap();
    assert!((bandwidth - 0.25).abs() < 1e-9, "{}", bandwidth);
    for p in response.points().iter().take_while(|p| p.frequency < 0.245) {
        assert!(p.db > -3.0, "{:?}", p);
    }
}

#[test]
fn batch_matches_sweep_step() {
    let fir = Fir::new(vec![0.2, 0.3, 0.5, -0.1]);
    let frequency = 0.003;
    let config = SweepConfig::new(frequency, frequency, 0.001).unwrap();
    let response = sweep(&fir, &config, 1500, 0.8, 1.0);

    let tone = signal::generate(frequency, 0.8, 1.0, 1500);
    let out = batch::run(&fir, &tone);
    assert_eq!(out, fir.process(&tone));
    assert_eq!(response.points()[0].db, decibels(peak(&out)));
}

#[test]
fn identity_sweep_is_flat() {
    let config = SweepConfig::new(0.05, 0.25, 0.05).unwrap();
    let response = sweep(&Identity, &config, 400, 1.0, 1.0);
    for p in response.points() {
        assert!(p.db <= 1e-9);
        assert!(p.db > -0.5, "{:?}", p);
    }
}

#[test]
fn runs_sweep_with_fir_file() {
    let dir = scratch("sweep");
    let coef = dir.join("filter.bin");
    write_raw(&coef, &[0.25, 0.25, 0.25, 0.25, 99.0]);

    let config = Config {
        filter: FilterChoice::Fir { path: coef, taps: 4 },
        rate: 1.0,
        output_dir: dir.join("output"),
        command: Command::Sweep(SweepSettings {
            range: SweepConfig::new(0.01, 0.05, 0.01).unwrap(),
            length: 500,
            ..SweepSettings::default()
        }),
    };
    cli::run(&config).unwrap();

    let amplitude = fs::read_to_string(dir.join("output/fir_amplitude.csv")).unwrap();
    let frequency = fs::read_to_string(dir.join("output/fir_frequency.csv")).unwrap();
    assert_eq!(amplitude.lines().count(), 5);
    assert_eq!(frequency.lines().next(), Some("0.010000"));
    let pairs = fs::read_to_string(dir.join("output/fir_response.csv")).unwrap();
    assert!(pairs.lines().all(|l| l.split(',').count() == 2));
}

#[test]
fn runs_batch_and_reports_short_input() {
    let dir = scratch("batch");
    let input = dir.join("signal.bin");
    write_raw(&input, &[1.0, 2.0, 3.0, 4.0]);

    let mut config = Config {
        filter: FilterChoice::Iir { cutoff: 0.1 },
        rate: 1.0,
        output_dir: dir.join("output"),
        command: Command::Batch(BatchSettings {
            input: input.clone(),
            count: Some(4),
            echo: true,
            plot: Some(dir.join("output/trace.png")),
            ..BatchSettings::default()
        }),
    };
    cli::run(&config).unwrap();
    assert!(dir.join("output/trace.png").exists());
    let filtered = fs::read_to_string(dir.join("output/iir_filtered.csv")).unwrap();
    let lines: Vec<&str> = filtered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(&lines[..2], &["0.000000", "0.000000"]);
    let echoed = fs::read_to_string(dir.join("output/signal.csv")).unwrap();
    assert_eq!(echoed.lines().last(), Some("4.000000"));

    config.command = Command::Batch(BatchSettings {
        input,
        count: Some(10),
        ..BatchSettings::default()
    });
    match cli::run(&config) {
        Err(Error::SizeMismatch { expected: 10, found: 4, .. }) => (),
        other => panic!("unexpected {:?}", other),
    }
}
