use std::fs;
use std::path::{Path, PathBuf};

use kiln::{FileEntry, Project};

/// Write `content` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    kiln::fs::normalize_path(&path)
}

/// `site` project whose `main.less` imports `vars.less`
pub fn site_on_disk(root: &Path) -> Project {
    let main = write_file(root, "main.less", "@import 'vars';\nbody { color: @c; }\n");
    let vars = write_file(root, "vars.less", "@c: red;\n");
    write_file(root, "readme.md", "# site\n");

    Project::new("site", kiln::fs::normalize_path(root))
        .with_file(FileEntry::new(&main, main.with_extension("css")))
        .with_file(FileEntry::new(&vars, vars.with_extension("css")).with_compile(false))
}
