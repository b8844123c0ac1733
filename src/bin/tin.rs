use anstream::println;
use anyhow::Context;
use clap::{arg, command, value_parser};
use coffee_tin::{expected_survivor, Bean, Game, Pool};
use owo_colors::OwoColorize;

/// The classic demonstration tins
const DEMO_TINS: &[&str] = &["BBBGG", "BBBGGG", "G", "B", "BG"];

pub fn main() -> anyhow::Result<()> {
    let matches = command!()
        .arg(arg!([tin]... "Tins to play, e.g. `BBBGG` (`-` marks a vacant slot)"))
        .arg(
            arg!(--seed <SEED> "Seed the pseudorandom generator")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--blues <N> "Blue beans in the reservoir")
                .long_help(
                    "Blue beans in the reservoir. A tin of n beans can need up \
                     to n - 1 replacements, which is also the default.",
                )
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--color <WHEN> "Controls when to use color")
                .default_value("auto")
                .value_parser(clap::builder::EnumValueParser::<clap::ColorChoice>::new()),
        )
        .get_matches();

    let color = match matches
        .get_one::<clap::ColorChoice>("color")
        .expect("default color value")
    {
        clap::ColorChoice::Auto => anstream::ColorChoice::Auto,
        clap::ColorChoice::Always => anstream::ColorChoice::Always,
        clap::ColorChoice::Never => anstream::ColorChoice::Never,
    };
    color.write_global();

    let seed = matches.get_one::<u64>("seed").copied();
    let blues = matches.get_one::<usize>("blues").copied();

    let mut game = if let Some(seed) = seed {
        Game::with_seed(seed)
    } else {
        Game::new()
    };

    let tins: Vec<String> = match matches.get_many::<String>("tin") {
        Some(tins) => tins.cloned().collect(),
        None => DEMO_TINS.iter().map(|s| s.to_string()).collect(),
    };

    for arg in &tins {
        let mut tin: Pool = arg
            .parse()
            .with_context(|| format!("bad tin `{arg}`"))?;
        let blues = blues.unwrap_or_else(|| tin.count_active().saturating_sub(1));
        let mut reservoir = Pool::reservoir(blues, 0, blues);

        let expected = expected_survivor(&tin);
        println!();
        println!("tin ({} greens): {tin}", tin.count_of(Bean::Green));

        let survivor = game
            .play(&mut tin, &mut reservoir)
            .with_context(|| format!("tin `{arg}`"))?;

        println!("tin after: {tin}");
        if survivor == expected {
            println!("last bean: {survivor}");
        } else {
            println!(
                "{}: wrong last bean: {survivor} (expected: {expected})",
                "oops".red().bold()
            );
        }
    }

    Ok(())
}
