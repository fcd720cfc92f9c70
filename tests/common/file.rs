use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
}

/// A few random lorem words, newline terminated
pub fn generate_content() -> String {
    use fake::{Fake, faker::lorem::en::Words};

    format!("{}\n", Words(3..8).fake::<Vec<String>>().join(" "))
}

/// Write `files_count` files with random names and contents directly under `dir`
pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{Fake, faker::lorem::en::Word};

    (0..files_count)
        .map(|index| {
            // the index keeps names unique even when the generator repeats a word
            let file_name = format!("{}-{index}.txt", Word().fake::<String>());
            let file_spec = FileSpec::new(dir.join(file_name), generate_content());
            write_file(file_spec.clone());

            file_spec
        })
        .collect()
}
