fn main() {
    tracing_subscriber::fmt().with_target(false).without_time().init();

    let mut cmd = pennon::Command::new("greet");
    cmd.version("0.1.0").about("Says hello.");
    let emoji = cmd.flag(Some('e'), Some("emoji"), "Finish with a heart.", false);
    let times = cmd.flag_validated(Some('n'), Some("times"), "How many times.", 1i64, |n| {
        if (1..=10).contains(n) {
            Ok(())
        } else {
            Err(format!("{n} is not between 1 and 10"))
        }
    });
    let name = cmd.positional("name", "Who to greet.", String::from("world"));

    let shout = cmd.subcommand("shout");
    shout.about("Says hello, loudly.");
    let loud_name = shout.positional("name", "Who to shout at.", String::from("WORLD"));

    let parsed = cmd.parse_env_or_exit();
    if parsed.path.last().map(String::as_str) == Some("shout") {
        println!("HELLO {}!", loud_name.get().to_uppercase());
        return;
    }

    let bang = if emoji.get() { "❣️" } else { "!" };
    for _ in 0..times.get() {
        println!("Hello {}{}", name.get(), bang);
    }
    for extra in parsed.remaining {
        println!("(ignored `{extra}`)");
    }
}
