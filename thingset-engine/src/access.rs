//! Access-matrix evaluation (§4.4): a descriptor's access bits against the
//! session's current authentication level.

use thingset_nodes::Access;

use crate::session::AuthLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Exec,
}

/// A request at `level` may perform `operation` on `access` if the plain
/// bit is set, or if the `-auth` bit is set and `level` is at least `user`
/// (maker satisfies a user-level requirement too). Writes additionally
/// recognize `WRITE_MAKER`, which only `maker` itself satisfies — `user`
/// does not, unlike the plain `-auth` tier.
pub fn check_access(access: Access, operation: Operation, level: AuthLevel) -> bool {
    let (plain, auth) = match operation {
        Operation::Read => (Access::READ, Access::READ_AUTH),
        Operation::Write => (Access::WRITE, Access::WRITE_AUTH),
        Operation::Exec => (Access::EXEC, Access::EXEC_AUTH),
    };
    if access.contains(plain) || (access.contains(auth) && level >= AuthLevel::User) {
        return true;
    }
    operation == Operation::Write && access.contains(Access::WRITE_MAKER) && level >= AuthLevel::Maker
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bit_grants_access_regardless_of_level() {
        assert!(check_access(Access::READ, Operation::Read, AuthLevel::None));
    }

    #[test]
    fn auth_bit_requires_at_least_user_level() {
        assert!(!check_access(Access::READ_AUTH, Operation::Read, AuthLevel::None));
        assert!(check_access(Access::READ_AUTH, Operation::Read, AuthLevel::User));
        assert!(check_access(Access::READ_AUTH, Operation::Read, AuthLevel::Maker));
    }

    #[test]
    fn missing_bit_denies_access() {
        assert!(!check_access(Access::WRITE, Operation::Read, AuthLevel::Maker));
    }

    #[test]
    fn write_maker_bit_requires_maker_level_exactly() {
        assert!(!check_access(Access::WRITE_MAKER, Operation::Write, AuthLevel::None));
        assert!(!check_access(Access::WRITE_MAKER, Operation::Write, AuthLevel::User));
        assert!(check_access(Access::WRITE_MAKER, Operation::Write, AuthLevel::Maker));
    }

    #[test]
    fn write_maker_bit_has_no_meaning_for_read_or_exec() {
        assert!(!check_access(Access::WRITE_MAKER, Operation::Read, AuthLevel::Maker));
        assert!(!check_access(Access::WRITE_MAKER, Operation::Exec, AuthLevel::Maker));
    }
}
