//! 依赖注入容器抽象接口
//!
//! 自动装配引擎只通过这里的方法向容器写入结果

use autowire_common::{Definition, ServiceIdentifier};

/// 服务定义容器 trait
///
/// 所有方法都只需要 `&self`，实现方负责内部同步。多个分析任务会并发调用
/// [`DefinitionContainer::try_set_alias`]，实现必须保证同一接口只有第一次注册生效。
pub trait DefinitionContainer: Send + Sync {
    /// 注册服务定义
    fn set_definition(&self, id: ServiceIdentifier, definition: Definition);

    /// 注册别名（覆盖已有别名）
    fn set_alias(&self, alias: ServiceIdentifier, id: ServiceIdentifier);

    /// 检查别名是否已存在
    fn has_alias(&self, alias: &ServiceIdentifier) -> bool;

    /// 仅当别名不存在时注册，返回是否注册成功
    ///
    /// 检查与写入必须是一次原子操作：并发调用同一别名时恰好一次返回 `true`。
    fn try_set_alias(&self, alias: ServiceIdentifier, id: ServiceIdentifier) -> bool;

    /// 获取服务定义
    fn definition(&self, id: &ServiceIdentifier) -> Option<Definition>;

    /// 获取别名指向的服务标识符
    fn alias(&self, alias: &ServiceIdentifier) -> Option<ServiceIdentifier>;

    /// 所有服务定义，按标识符排序
    fn definitions(&self) -> Vec<(ServiceIdentifier, Definition)>;

    /// 所有别名，按别名排序
    fn aliases(&self) -> Vec<(ServiceIdentifier, ServiceIdentifier)>;
}
