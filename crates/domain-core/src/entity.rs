//! 实体基础 trait

use std::fmt::Display;
use std::hash::Hash;

use erp_common::{AuditInfo, UserId};
use uuid::Uuid;

/// 实体标识
pub trait EntityId: Clone + Eq + Hash + Display + Send + Sync + 'static {
    fn from_uuid(uuid: Uuid) -> Self;
    fn as_uuid(&self) -> Uuid;
}

impl EntityId for UserId {
    fn from_uuid(uuid: Uuid) -> Self {
        UserId(uuid)
    }

    fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// 实体 trait
pub trait Entity {
    type Id: EntityId;

    fn id(&self) -> &Self::Id;
}

/// 聚合根 trait
pub trait AggregateRoot: Entity {
    fn audit_info(&self) -> &AuditInfo;
    fn audit_info_mut(&mut self) -> &mut AuditInfo;

    fn is_deleted(&self) -> bool {
        self.audit_info().is_deleted
    }
}

/// 定义基于 UUID 的实体 ID 新类型
///
/// ```ignore
/// entity_id!(WarehouseId);
/// ```
#[macro_export]
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
        )]
        pub struct $name(pub $crate::__private::uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self($crate::__private::uuid::Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                <$crate::__private::uuid::Uuid as $crate::__private::serde::Deserialize<'de>>::deserialize(deserializer)
                    .map(Self)
            }
        }

        impl From<$crate::__private::uuid::Uuid> for $name {
            fn from(uuid: $crate::__private::uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl $crate::EntityId for $name {
            fn from_uuid(uuid: $crate::__private::uuid::Uuid) -> Self {
                Self(uuid)
            }

            fn as_uuid(&self) -> $crate::__private::uuid::Uuid {
                self.0
            }
        }
    };
}

/// 为带 `id` 与 `audit_info` 字段的结构体实现 `Entity` + `AggregateRoot`
#[macro_export]
macro_rules! impl_aggregate_root {
    ($ty:ty, $id:ty) => {
        impl $crate::Entity for $ty {
            type Id = $id;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }

        impl $crate::AggregateRoot for $ty {
            fn audit_info(&self) -> &$crate::AuditInfo {
                &self.audit_info
            }

            fn audit_info_mut(&mut self) -> &mut $crate::AuditInfo {
                &mut self.audit_info
            }
        }
    };
}
