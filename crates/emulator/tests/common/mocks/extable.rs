use mockall::mock;
use sw64_unaligned::kernel::{ExceptionTableEntry, ExceptionTableSearch};

mock! {
    pub Extable {}
    impl ExceptionTableSearch for Extable {
        fn search(&self, pc: u64) -> Option<ExceptionTableEntry>;
    }
}
