//! 授权引擎
//!
//! 平台权限的唯一事实来源。所有 API 操作在触碰存储层之前，
//! 必须先通过 `evaluate` 得到一个显式的 Allow / Deny 决策。
//!
//! 引擎是纯函数：不做任何 I/O，关系上下文（选课、授课、归属）由调用方
//! 通过 `Resource` 描述符传入，因此可以脱离数据库独立测试。

mod actor;
mod decision;
mod engine;
mod resource;

pub use actor::Actor;
pub use decision::{Decision, DenyReason};
pub use engine::evaluate;
pub use resource::{Action, CourseRelation, CourseScope, Resource};
