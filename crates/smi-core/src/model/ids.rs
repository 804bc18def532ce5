//! Dense arena indices for the resolved model (spec §9 "Cyclic pointer
//! graphs": entities refer to each other through indices, not pointers).

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(NodeId);
define_id!(ModuleId);
define_id!(TypeId);
define_id!(ObjectId);
define_id!(NotificationId);
define_id!(GroupId);
define_id!(ComplianceId);
define_id!(CapabilityId);
