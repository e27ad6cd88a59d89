//! 主数据状态

use std::fmt;

use erp_errors::AppError;
use serde::{Deserialize, Serialize};

/// 主数据状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataStatus {
    #[default]
    Active,
    Inactive,
    Blocked,
}

impl DataStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl From<DataStatus> for i16 {
    fn from(status: DataStatus) -> Self {
        match status {
            DataStatus::Active => 1,
            DataStatus::Inactive => 2,
            DataStatus::Blocked => 3,
        }
    }
}

impl TryFrom<i16> for DataStatus {
    type Error = AppError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Active),
            2 => Ok(Self::Inactive),
            3 => Ok(Self::Blocked),
            other => Err(AppError::internal(format!("Unknown data status: {}", other))),
        }
    }
}

impl fmt::Display for DataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Blocked => "Blocked",
        };
        f.write_str(s)
    }
}

/// 以 SMALLINT 存储的枚举
///
/// 为工作流状态等枚举生成 `i16` 双向转换。
#[macro_export]
macro_rules! smallint_enum {
    ($ty:ident { $($variant:ident = $code:literal),+ $(,)? }) => {
        impl From<$ty> for i16 {
            fn from(value: $ty) -> Self {
                match value {
                    $($ty::$variant => $code,)+
                }
            }
        }

        impl TryFrom<i16> for $ty {
            type Error = $crate::__private::erp_errors::AppError;

            fn try_from(value: i16) -> Result<Self, Self::Error> {
                match value {
                    $($code => Ok($ty::$variant),)+
                    other => Err($crate::__private::erp_errors::AppError::internal(format!(
                        "Unknown {} code: {}",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }
    };
}
