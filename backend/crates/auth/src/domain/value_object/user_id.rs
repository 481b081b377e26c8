pub use kernel::id::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_are_v4() {
        assert_eq!(UserId::new().as_uuid().get_version_num(), 4);
    }
}
