use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    UserId,
    CourseId,
    PricePaidCents,
    OriginalPriceCents,
    DiscountCents,
    PromoCode,
    SubscribedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 订阅记录表
///
/// user_id / course_id 不加外键: 只在下单时校验存在性，课程删除后历史订阅保留。
/// (user_id, course_id) 唯一索引保证同一用户对同一课程只能订阅一次，
/// 并发重复插入时由数据库拒绝第二个写入。
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::UserId).integer().not_null())
                    .col(ColumnDef::new(Subscriptions::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::PricePaidCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::OriginalPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::DiscountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::PromoCode)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::SubscribedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subscriptions_user_course_unique")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subscriptions_course")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Subscriptions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
