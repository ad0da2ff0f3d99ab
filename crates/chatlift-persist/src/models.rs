use chatlift_types::{Account, FileRecord, Reply};

use crate::repository::Record;

impl Record for Account {
    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.wx_id)
    }
}

impl Record for FileRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Reply {
    fn id(&self) -> &str {
        &self.id
    }
}
