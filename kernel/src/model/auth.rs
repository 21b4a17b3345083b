#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn session_key(&self) -> String {
        format!("session:{}", self.0)
    }
}
