use std::fmt::Arguments;
use std::io::Write;

pub mod cc {
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_CYAN: &str = "\x1b[96m";
    pub const LIGHT_YELLOW: &str = "\x1b[93m";
}

/// `HH:MM:SS.mmm | <color>message<reset>` on stderr.
pub fn emit(color: &str, args: Arguments<'_>) {
    let time = chrono::Utc::now().format("%H:%M:%S%.3f");
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(
        stderr,
        "{}{} | {}{}{}{}",
        cc::LIGHT_GRAY,
        time,
        cc::RESET,
        color,
        args,
        cc::RESET
    );
}

#[macro_export]
macro_rules! log {
    // log!("hello {}", x);  the literal arm goes first so a literal
    // argument is never taken for a color
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::libs::writing::emit(
            $crate::libs::writing::cc::LIGHT_GRAY,
            format_args!($fmt $(, $arg)*),
        )
    };
    // log!(cc::LIGHT_GREEN, "hello {}", x);
    ($color:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::libs::writing::emit($color, format_args!($fmt $(, $arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::libs::writing::emit(
            $crate::libs::writing::cc::ORANGE,
            format_args!($($arg)*),
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn smoke_log_variants_compile() {
        crate::log!(crate::libs::writing::cc::LIGHT_GREEN, "colored no args");
        crate::log!(crate::libs::writing::cc::LIGHT_GREEN, "colored with arg: {}", 123);
        crate::log!("plain no args");
        crate::log!("plain with arg: {}", 456);
        crate::warn!("warned: {}", "fallback");
    }
}
