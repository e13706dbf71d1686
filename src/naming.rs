use chrono::{Local, Timelike};

/// Strategy for naming the target file when the caller does not supply one.
///
/// The default derives the name from the wall clock; tests inject a fixed
/// namer so runs are deterministic.
pub trait FileNamer {
    /// Produce a candidate file name, relative to the repository root.
    fn next_name(&mut self) -> String;
}

/// Default namer: `<sub-second microseconds>.txt`.
///
/// The sub-second component keeps consecutive runs from colliding on the
/// same name; an actual collision is detected by the painter and is fatal.
pub struct ClockNamer;

impl FileNamer for ClockNamer {
    fn next_name(&mut self) -> String {
        let micros = Local::now().nanosecond() / 1_000;
        format!("{}.txt", micros)
    }
}

#[cfg(test)]
pub struct FixedNamer(pub String);

#[cfg(test)]
impl FileNamer for FixedNamer {
    fn next_name(&mut self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockNamer, FileNamer, FixedNamer};

    #[test]
    fn clock_namer_emits_txt_names() {
        let name = ClockNamer.next_name();
        assert!(name.ends_with(".txt"));
        let stem = name.trim_end_matches(".txt");
        assert!(stem.parse::<u32>().is_ok());
    }

    #[test]
    fn fixed_namer_repeats_its_name() {
        let mut namer = FixedNamer(String::from("canvas.txt"));
        assert_eq!(namer.next_name(), "canvas.txt");
        assert_eq!(namer.next_name(), "canvas.txt");
    }
}
