/// A stored row of `tb_users`. Every attribute but `id` may be null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    /// `DD.MM.YYYY`
    pub birthday: Option<String>,
    pub age: Option<i32>,
    pub is_male: Option<bool>,
}

/// Column values for an insert; the id is assigned by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub age: Option<i32>,
    pub is_male: Option<bool>,
}

impl NewUser {
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            birthday: self.birthday,
            age: self.age,
            is_male: self.is_male,
        }
    }
}
