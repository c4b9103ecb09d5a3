//! Access bitset (§3, §4.4), grounded on the access bit values in
//! `original_source/src/thingset.h` (`READ`..`EXEC_AUTH`), plus a
//! maker-exclusive write bit mirroring `TS_MKR_W` from
//! `original_source/test/test_data.h`.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Access: u8 {
        const READ = 0x01;
        const WRITE = 0x02;
        const READ_AUTH = 0x04;
        const WRITE_AUTH = 0x08;
        const EXEC = 0x10;
        const EXEC_AUTH = 0x20;
        /// Write access gated on the `maker` level specifically, unlike
        /// `WRITE_AUTH` which is satisfied by `user` or `maker` alike.
        const WRITE_MAKER = 0x40;
    }
}

impl Access {
    /// Read and write, at either the unauthenticated or the `user` level.
    pub const ANY_RW: Access = Access::READ.union(Access::WRITE).union(Access::READ_AUTH).union(Access::WRITE_AUTH);
    /// Read at either the unauthenticated or the `user` level.
    pub const ANY_R: Access = Access::READ.union(Access::READ_AUTH);
}
