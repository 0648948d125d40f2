#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EntryType {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    entry_type: EntryType,
    content: Vec<u8>,
}

impl Entry {
    pub fn new(entry_type: EntryType) -> Entry {
        Entry {
            entry_type,
            content: Vec::new(),
        }
    }

    pub fn with_content(content: &[u8]) -> Entry {
        Entry {
            entry_type: EntryType::File,
            content: content.to_vec(),
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}
