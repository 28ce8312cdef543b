#[macro_export]
macro_rules! print_header {
    ($($arg:tt)+) => {{
        use std::io::Write;
        use termcolor::{StandardStream, ColorChoice, Color, ColorSpec, WriteColor};

        let mut stdout = StandardStream::stdout(ColorChoice::Auto);

        stdout.set_color(
            ColorSpec::new()
                .set_bold(true)
                .set_intense(true)
                .set_fg(Some(Color::Blue))
        ).ok();

        writeln![&mut stdout, $($arg)+].ok();

        stdout.reset().ok();
    }};
}

#[macro_export]
macro_rules! print_entry {
    ($($arg:tt)+) => {{
        use std::io::Write;
        use termcolor::{StandardStream, ColorChoice, Color, ColorSpec, WriteColor};

        let mut stdout = StandardStream::stdout(ColorChoice::Auto);

        stdout.set_color(
            ColorSpec::new()
                .set_fg(Some(Color::Green))
        ).ok();

        write![&mut stdout, $($arg)+].ok();

        stdout.reset().ok();
    }};
}

#[macro_export]
macro_rules! errorln {
    ($($arg:tt)+) => {{
        use std::io::Write;
        use termcolor::{StandardStream, ColorChoice, Color, ColorSpec, WriteColor};

        let mut stderr = StandardStream::stderr(ColorChoice::Auto);

        stderr.set_color(
            ColorSpec::new()
                .set_fg(Some(Color::Red))
                .set_bold(true)
        ).ok();

        write![&mut stderr, "error"].ok();
        stderr.reset().ok();
        write![&mut stderr, ": "].ok();
        writeln![&mut stderr, $($arg)+].ok();
    }};
}
