//! Vocademy - 职业学院课业考核后端服务
//!
//! 基于 Actix Web 构建的课业提交与评估系统后端。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis，认证档案按令牌缓存）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `oracle`: AI 评分预言机客户端
//! - `policy`: 纯函数授权策略引擎
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod oracle;
pub mod policy;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
