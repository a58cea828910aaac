/// Sequential id generator used by the in-memory entity store.
///
/// Ids start at 1; `0` is never handed out so it can be used as "unset" by callers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IdManager {
    pub current: Option<u64>,
}

impl IdManager {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Move the sequence forward so the next id is greater than `value`.
    pub fn set_current(&mut self, value: u64) -> Result<(), String> {
        match self.current {
            Some(current) if current > value => {
                Err(format!("Cannot move id sequence back from {current} to {value}"))
            }
            _ => {
                self.current = Some(value);
                Ok(())
            }
        }
    }
}

impl Iterator for IdManager {
    type Item = u64;
    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.current {
            Some(u64::MAX) => return None,
            Some(id) => id + 1,
            None => 1,
        };

        self.current = Some(item);
        Some(item)
    }
}
