use chrono::NaiveDate;
use console::{measure_text_width, style};
use std::path::Path;

/// Prints a boxed, colorized summary of the paint run about to start.
///
/// The box is sized to the widest **visible** line, using
/// [`console::measure_text_width`] so inline ANSI color codes do not skew
/// the padding, and framed with Unicode box-drawing characters.
///
/// # Parameters
///
/// * `sentence` – The text being painted.
/// * `anchor` – First Sunday the layout starts from.
/// * `month`, `year` – The month whose first Sunday was chosen.
/// * `file` – Name of the tracked target file.
/// * `repo` – Path of the repository being written to.
/// * `commits` – Total commits the sentence will produce.
pub fn print_banner(
    sentence: &str,
    anchor: NaiveDate,
    month: u32,
    year: i32,
    file: &str,
    repo: &Path,
    commits: usize,
) {
    let lines = banner_lines(sentence, anchor, month, year, file, repo, commits);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l)) // ignore ANSI in content
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).blue().bold();
    let bottom = style(format!("╚{}╝", border)).blue().bold();
    let left = style("║ ").blue().bold().to_string();
    let right = style("║").blue().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let visible = measure_text_width(&line);
        let pad = max_width - visible; // includes the one space after left border
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Builds the banner's text lines, in display order.
///
/// Some lines carry ANSI styling, so callers measuring width must use
/// visible width rather than `str::len()`.
fn banner_lines(
    sentence: &str,
    anchor: NaiveDate,
    month: u32,
    year: i32,
    file: &str,
    repo: &Path,
    commits: usize,
) -> Vec<String> {
    vec![
        String::from("Paint a sentence onto the contribution graph"),
        String::new(),
        format!("Sentence:   {}", sentence),
        format!(
            "Anchor:     {} (first Sunday of {}/{})",
            anchor.format("%Y-%m-%d"),
            month,
            year
        ),
        format!("Target:     {}", file),
        format!("Repository: {}", repo.display()),
        String::new(),
        style(format!(
            "{} commits will be appended, one per lit cell.",
            commits
        ))
        .cyan()
        .bold()
        .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::banner_lines;
    use chrono::NaiveDate;
    use std::path::Path;

    #[test]
    fn banner_names_the_run_parameters() {
        let anchor = NaiveDate::from_ymd_opt(2024, 2, 4).expect("valid test date");
        let lines = banner_lines("HI", anchor, 2, 2024, "712345.txt", Path::new("./"), 12);
        let s = lines.join("\n");

        assert!(s.contains("Paint a sentence onto the contribution graph"));
        assert!(s.contains("Sentence:   HI"));
        assert!(s.contains("2024-02-04 (first Sunday of 2/2024)"));
        assert!(s.contains("712345.txt"));
        assert!(s.contains("12 commits will be appended"));
    }

    #[test]
    fn banner_width_covers_the_title() {
        let anchor = NaiveDate::from_ymd_opt(2024, 2, 4).expect("valid test date");
        let lines = banner_lines("HI", anchor, 2, 2024, "t.txt", Path::new("./"), 0);
        let max_line = lines.iter().map(|l| l.len()).max().unwrap_or(0);

        assert!(max_line >= "Paint a sentence onto the contribution graph".len());
    }
}
