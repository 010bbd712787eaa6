use sea_orm_migration::prelude::*;

/// Service orders (ordens de serviço)
#[derive(DeriveIden)]
enum OrdensServico {
    Table,
    Id,
    Numero,
    Cliente,
    Endereco,
    Cidade,
    Telefone,
    CpfCnpj,
    Email,
    DataCriacao,
    DataConclusao,
    Status,
    Observacoes,
    ValorTotal,
}

/// Order line items
#[derive(DeriveIden)]
enum ItensOrdem {
    Table,
    Id,
    OrdemId,
    Descricao,
    Quantidade,
    ValorUnitario,
    ValorTotal,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrdensServico::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrdensServico::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OrdensServico::Numero)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(OrdensServico::Cliente).string_len(200).not_null())
                    .col(ColumnDef::new(OrdensServico::Endereco).string_len(300).null())
                    .col(ColumnDef::new(OrdensServico::Cidade).string_len(100).null())
                    .col(ColumnDef::new(OrdensServico::Telefone).string_len(20).null())
                    .col(ColumnDef::new(OrdensServico::CpfCnpj).string_len(20).null())
                    .col(ColumnDef::new(OrdensServico::Email).string_len(100).null())
                    .col(
                        ColumnDef::new(OrdensServico::DataCriacao)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrdensServico::DataConclusao)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(OrdensServico::Status)
                            .string_len(20)
                            .not_null()
                            .default("pendente"),
                    )
                    .col(ColumnDef::new(OrdensServico::Observacoes).text().null())
                    .col(
                        ColumnDef::new(OrdensServico::ValorTotal)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        // dashboard filters by status and sorts by creation date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ordens_servico_status")
                    .table(OrdensServico::Table)
                    .col(OrdensServico::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ordens_servico_data_criacao")
                    .table(OrdensServico::Table)
                    .col(OrdensServico::DataCriacao)
                    .to_owned(),
            )
            .await?;

        // SQLite cannot add a foreign key after the fact, so it is declared inline
        manager
            .create_table(
                Table::create()
                    .table(ItensOrdem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ItensOrdem::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ItensOrdem::OrdemId).integer().not_null())
                    .col(ColumnDef::new(ItensOrdem::Descricao).string_len(300).not_null())
                    .col(
                        ColumnDef::new(ItensOrdem::Quantidade)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(
                        ColumnDef::new(ItensOrdem::ValorUnitario)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(ItensOrdem::ValorTotal)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_itens_ordem_ordem")
                            .from(ItensOrdem::Table, ItensOrdem::OrdemId)
                            .to(OrdensServico::Table, OrdensServico::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_itens_ordem_ordem_id")
                    .table(ItensOrdem::Table)
                    .col(ItensOrdem::OrdemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItensOrdem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrdensServico::Table).to_owned())
            .await?;
        Ok(())
    }
}
