//! Transforms a tagged corpus into context-sensitive lemmatization examples.
use clap::{App, Arg, ArgMatches};
use log::info;
use stdinout::OrExit;

use lemma_context_rs::{
    read_conllx, segment, transform_sentences, CharNgrams, ColumnLayout, ColumnReader,
    ContextUnitKind, ExampleWriter, OutputPaths, TransformConfig, Transformer,
};
use lemma_context_rs_utils::{
    common_args, parse_arg, parse_args, read_config, setup_logging, DEFAULT_CLAP_SETTINGS,
};

fn main() {
    let parsed = args();
    setup_logging(&parsed);

    let mut config = read_config(&parsed);
    override_transform_config(&mut config.transform, &parsed);
    config
        .validate()
        .or_exit("Invalid transformation options", 1);

    // decide on the outputs before doing any work
    let paths = match parse_args::<String>(&parsed, "OUTPUT") {
        Some(paths) => match paths.as_slice() {
            [source, target] => OutputPaths::new(source, target),
            _ => None::<OutputPaths>.or_exit("You must specify both source and target output paths.", 1),
        },
        None => OutputPaths::infer(
            parsed.value_of("INPUT"),
            parsed.value_of("OUTPUT_DIR").unwrap(),
            &config.transform,
        )
        .or_exit("Cannot determine the output paths", 1),
    };

    let input = stdinout::Input::from(parsed.value_of("INPUT"));
    let buf_read = input.buf_read().or_exit("Cannot open input file", 1);

    let mut sentences = if parsed.is_present("CONLLX") {
        read_conllx(conllx::io::Reader::new(buf_read)).or_exit("Reading the corpus failed", 1)
    } else {
        let layout = ColumnLayout::new(
            parse_arg(&parsed, "WORD_COLUMN").unwrap(),
            parse_arg(&parsed, "LEMMA_COLUMN").unwrap(),
            parse_arg(&parsed, "TAG_COLUMN").unwrap(),
        );
        segment(ColumnReader::new(buf_read, layout))
            .collect::<Result<Vec<_>, _>>()
            .or_exit("Reading the corpus failed", 1)
    };
    info!("Read {} sentences.", sentences.len());

    if config.transform.context_unit == ContextUnitKind::Char {
        let n_grams = CharNgrams::new(
            config.transform.char_n_gram,
            config.transform.subword_separator.as_str(),
        )
        .or_exit("Invalid char n-gram size", 1);
        for sentence in &mut sentences {
            n_grams.segment_sentence(sentence);
        }
    }

    let transformer =
        Transformer::new(config.transform).or_exit("Cannot construct the transformer", 1);
    let mut writer = ExampleWriter::create(&paths).or_exit("Cannot create output files", 1);

    let verbose = parsed.is_present("VERBOSE");
    let pb = indicatif::ProgressBar::new(0);
    pb.set_style(
        indicatif::ProgressStyle::default_spinner().template("Time: {elapsed_precise} ::: {msg}"),
    );
    if verbose {
        pb.enable_steady_tick(200);
    }

    let stats = transform_sentences(&transformer, &sentences, &mut writer, |stats| {
        if verbose {
            pb.set_message(&format!(
                "Sentences: {} ::: examples: {}",
                stats.sentences, stats.examples
            ));
        }
    })
    .or_exit("Transforming the corpus failed", 1);
    pb.finish_and_clear();

    let lines = writer.lines();
    writer.finish().or_exit("Writing the output failed", 1);
    info!(
        "Wrote {} lines from {} sentences to {} and {}.",
        lines,
        stats.sentences,
        paths.source.display(),
        paths.target.display()
    );
}

fn override_transform_config(config: &mut TransformConfig, args: &ArgMatches) {
    if let Some(unit) = parse_arg(args, "CONTEXT_UNIT") {
        config.context_unit = unit;
    }
    if let Some(unit) = parse_arg(args, "WORD_UNIT") {
        config.word_unit = unit;
    }
    if let Some(n) = parse_arg(args, "CHAR_N_GRAM") {
        config.char_n_gram = n;
    }
    if let Some(size) = parse_arg(args, "CONTEXT_SIZE") {
        config.context_size = size;
    }
    if let Some(size) = parse_arg(args, "CONTEXT_CHAR_SIZE") {
        config.context_char_size = Some(size);
    }
    if let Some(span) = parse_arg(args, "CONTEXT_SPAN") {
        config.context_span = span;
    }

    let mut symbols = [
        ("LEFT_CONTEXT_BOUNDARY", &mut config.left_context_boundary),
        ("RIGHT_CONTEXT_BOUNDARY", &mut config.right_context_boundary),
        ("WORD_BOUNDARY", &mut config.word_boundary),
        ("EXAMPLE_BOUNDARY_TAG", &mut config.example_boundary_tag),
        ("SUBWORD_SEPARATOR", &mut config.subword_separator),
    ];
    for (name, symbol) in symbols.iter_mut() {
        if let Some(value) = args.value_of(*name) {
            **symbol = value.to_owned();
        }
    }
}

fn symbol_arg<'a, 'b>(name: &'a str, long: &'a str, help: &'a str) -> Arg<'a, 'b> {
    Arg::with_name(name)
        .help(help)
        .long(long)
        .takes_value(true)
        .required(false)
}

fn args() -> ArgMatches<'static> {
    let app = App::new("transform-corpus")
        .settings(DEFAULT_CLAP_SETTINGS)
        .about("Adapts a tagged corpus to context-sensitive lemmatization.")
        .arg(
            Arg::with_name("INPUT")
                .help("Corpus to be transformed. If not provided input reads from stdin.")
                .long_help(
                    "Whitespace separated columns with word, lemma and tag, sentences are \
                     separated by blank lines. If no input file is provided the input is read \
                     from stdin and --output is required.",
                )
                .index(1)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Output source and target files.")
                .long_help(
                    "Source and target output files. If not provided the paths are derived from \
                     the input path and the transformation options.",
                )
                .long("output")
                .short("o")
                .takes_value(true)
                .number_of_values(2)
                .value_names(&["SOURCE", "TARGET"])
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT_DIR")
                .help("Directory for derived output paths.")
                .long("output_dir")
                .takes_value(true)
                .default_value("input"),
        )
        .arg(
            Arg::with_name("CONLLX")
                .help("Read the input in CoNLL-X format.")
                .long("conllx")
                .required(false),
        )
        .arg(
            Arg::with_name("WORD_COLUMN")
                .help("Index of word column in the file (zero-indexed).")
                .long("word_column_index")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("LEMMA_COLUMN")
                .help("Index of lemma column in the file (zero-indexed).")
                .long("lemma_column_index")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("TAG_COLUMN")
                .help("Index of tag column in the file (zero-indexed).")
                .long("tag_column_index")
                .takes_value(true)
                .default_value("2"),
        )
        .arg(
            Arg::with_name("CONTEXT_UNIT")
                .help("Type of context representation.")
                .long("context_unit")
                .takes_value(true)
                .possible_values(&["char", "bpe", "word"]),
        )
        .arg(
            Arg::with_name("WORD_UNIT")
                .help("Type of word representation.")
                .long("word_unit")
                .takes_value(true)
                .possible_values(&["char", "word"]),
        )
        .arg(
            Arg::with_name("CHAR_N_GRAM")
                .help("Size of char-n-gram context (only used if --context_unit is char).")
                .long("char_n_gram")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("CONTEXT_SIZE")
                .help("Size of context representation (in respective units) on left and right.")
                .long_help(
                    "Size of context representation (in respective units) on left and right, 0 \
                     uses the full span.",
                )
                .long("context_size")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("CONTEXT_CHAR_SIZE")
                .help("Size of context representation (in characters) on left and right.")
                .long_help(
                    "Size of context representation (in characters) on left and right, 0 uses \
                     the full span. Has precedence over --context_size.",
                )
                .long("context_char_size")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("CONTEXT_SPAN")
                .help("Number of sentences on the left and right that provide context.")
                .long("context_span")
                .takes_value(true),
        )
        .arg(symbol_arg(
            "LEFT_CONTEXT_BOUNDARY",
            "left_context_boundary",
            "Left context boundary special symbol.",
        ))
        .arg(symbol_arg(
            "RIGHT_CONTEXT_BOUNDARY",
            "right_context_boundary",
            "Right context boundary special symbol.",
        ))
        .arg(symbol_arg(
            "WORD_BOUNDARY",
            "word_boundary",
            "Word boundary special symbol.",
        ))
        .arg(symbol_arg(
            "EXAMPLE_BOUNDARY_TAG",
            "example_boundary_tag",
            "Example boundary tag special symbol, without angle brackets.",
        ))
        .arg(symbol_arg(
            "SUBWORD_SEPARATOR",
            "subword_separator",
            "Separator between non-final subword units.",
        ));

    common_args(app).get_matches()
}
