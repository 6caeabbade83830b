use std::time::Instant;

use xshell::{cmd, Shell};

fn main() -> xshell::Result<()> {
    let sh = Shell::new()?;

    cmd!(sh, "rustup toolchain install stable --no-self-update").run()?;
    let _e = sh.push_env("RUSTUP_TOOLCHAIN", "stable");
    cmd!(sh, "rustc --version").run()?;

    {
        let _s = section("BUILD");
        cmd!(sh, "cargo test --workspace --no-run").run()?;
        cmd!(sh, "cargo build --example greet").run()?;
    }

    {
        let _s = section("TEST");
        cmd!(sh, "cargo test --workspace -- --nocapture").run()?;
        cmd!(sh, "cargo test --doc -p pennon").run()?;
    }

    {
        let _s = section("DEMO");
        // `--help` and a bad count must both end in a clean exit.
        let help = cmd!(sh, "cargo run -q --example greet -- --help").read()?;
        assert!(help.contains("USAGE:"), "greet --help printed no usage:\n{help}");
        let greeting = cmd!(sh, "cargo run -q --example greet -- -n 99 ferris").read()?;
        assert_eq!(greeting.trim(), "Hello ferris!");
        cmd!(sh, "cargo run -q --example greet -- shout crab").run()?;
    }

    {
        let _s = section("PUBLISH");

        let pkgid = cmd!(sh, "cargo pkgid -p pennon").read()?;
        let version = pkgid.rsplit(['#', '@']).next().unwrap_or_default().to_string();
        let tag = format!("v{version}");

        let current_branch = cmd!(sh, "git branch --show-current").read()?;
        let tag_exists =
            cmd!(sh, "git tag --list").read()?.split_ascii_whitespace().any(|it| it == tag);

        if current_branch == "master" && !tag_exists {
            cmd!(sh, "git tag {tag}").run()?;
            cmd!(sh, "cargo publish -p pennon").run()?;
            cmd!(sh, "git push --tags").run()?;
        }
    }

    Ok(())
}

fn section(name: &'static str) -> impl Drop {
    struct Section {
        name: &'static str,
        start: Instant,
    }
    impl Drop for Section {
        fn drop(&mut self) {
            eprintln!("{}: {:.2?}", self.name, self.start.elapsed());
            println!("::endgroup::");
        }
    }
    println!("::group::{name}");
    Section { name, start: Instant::now() }
}
