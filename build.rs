use std::fs;

// Lesson styling is embedded with include_str!, so a broken file must stop
// the build rather than silently fall back to bare markup at runtime.
fn main() {
    let styling_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={styling_path}");

    let styling = match fs::read_to_string(styling_path) {
        Ok(styling) => styling,
        Err(e) => panic!("cannot read lesson styling {styling_path}: {e}"),
    };

    let table = match styling.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("lesson styling {styling_path} is not valid TOML: {e}"),
    };

    for section in table.keys() {
        if !matches!(section.as_str(), "headings" | "lists" | "code" | "paragraph") {
            panic!("lesson styling {styling_path} has unknown section [{section}]");
        }
    }
}
