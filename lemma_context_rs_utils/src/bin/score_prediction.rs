//! Scores lemmatizer predictions against ground truth.
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use clap::{App, Arg, ArgMatches};
use log::info;
use stdinout::OrExit;

use lemma_context_rs::{job_name, ColumnLayout, ColumnReader, Scorer, Token};
use lemma_context_rs_utils::{common_args, parse_args, read_config, setup_logging, DEFAULT_CLAP_SETTINGS};

fn main() {
    let parsed = args();
    setup_logging(&parsed);

    let config = read_config(&parsed);

    let prediction_path = parsed.value_of("PREDICTION").unwrap();
    let training_path = parsed
        .value_of("TRAINING")
        .map(Path::new)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.dataset.training_path());
    let ground_path = parsed
        .value_of("GROUND")
        .map(Path::new)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.dataset.ground_path());

    let dataset_layout = column_layout(&parsed, "DATASET_COLS");
    let prediction_layout = column_layout(&parsed, "PREDICTION_COLS");

    let training = read_table(&training_path, dataset_layout);
    let ground = read_table(&ground_path, dataset_layout);
    let prediction = read_table(prediction_path, prediction_layout);

    let report = Scorer::new(&training, ground)
        .score(prediction)
        .or_exit("More rows predicted than necessary", 1);

    let stderr = io::stderr();
    report
        .write_report(&mut stderr.lock(), prediction_path, &config.pprint)
        .or_exit("Writing the report failed", 1);
    println!("{}", report.summary());

    if let Some(export_path) = parsed.value_of("EXPORT") {
        let job = parsed
            .value_of("JOB_NAME")
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| job_name(prediction_path));
        let out = BufWriter::new(File::create(export_path).or_exit("Cannot create export file", 1));
        report
            .export(out, &job)
            .or_exit("Exporting the report failed", 1);
        info!("Exported report of job '{}' to {}.", job, export_path);
    }
}

fn column_layout(args: &ArgMatches, name: &str) -> ColumnLayout {
    parse_args::<usize>(args, name)
        .map(|indices| ColumnLayout::from_indices(&indices).or_exit("Invalid column indices", 1))
        .unwrap_or_default()
}

fn read_table<P: AsRef<Path>>(path: P, layout: ColumnLayout) -> Vec<Token> {
    let path = path.as_ref();
    let file = File::open(path).or_exit(format!("Cannot open {}", path.display()), 1);
    let tokens = ColumnReader::new(BufReader::new(file), layout)
        .tokens()
        .or_exit(format!("Reading {} failed", path.display()), 1);
    info!("Read {} rows from {}.", tokens.len(), path.display());
    tokens
}

fn args() -> ArgMatches<'static> {
    let app = App::new("score-prediction")
        .settings(DEFAULT_CLAP_SETTINGS)
        .about("Scores lemma and tag predictions against ground truth.")
        .arg(
            Arg::with_name("PREDICTION")
                .help("File name of predictions.")
                .index(1)
                .required(true),
        )
        .arg(
            Arg::with_name("TRAINING")
                .help("Training file name.")
                .long_help(
                    "Training partition of the dataset, used to find unseen and ambiguous words. \
                     Defaults to training.txt of the dataset folder in the config.",
                )
                .long("training")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("GROUND")
                .help("Ground truth file name.")
                .long_help(
                    "Ground truth the predictions are aligned with row by row. Defaults to \
                     dev.txt of the dataset folder in the config.",
                )
                .long("ground")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("DATASET_COLS")
                .help("Word, lemma and tag column indices of the dataset partitions.")
                .long("dataset_cols")
                .takes_value(true)
                .number_of_values(3),
        )
        .arg(
            Arg::with_name("PREDICTION_COLS")
                .help("Word, lemma and tag column indices of the prediction file.")
                .long("prediction_cols")
                .takes_value(true)
                .number_of_values(3),
        )
        .arg(
            Arg::with_name("EXPORT")
                .help("Writes the report as JSON to this file.")
                .long("export")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("JOB_NAME")
                .help("Job name when exporting.")
                .long_help(
                    "Job name when exporting. Defaults to the suffix after 'prediction.' in the \
                     prediction file name, or 'dev'.",
                )
                .long("job_name")
                .takes_value(true)
                .requires("EXPORT"),
        );

    common_args(app).get_matches()
}
