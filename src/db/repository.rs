//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Agent, AgentDistribution, CreateAgentRequest, DistributionAgent, Lead, LeadSummary, List,
    ListStatus, NewLead, User,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// Find a user by email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, is_admin FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Count admin users.
    pub async fn count_admins(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE is_admin = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Whether any admin user exists.
    pub async fn admin_exists(&self) -> Result<bool, AppError> {
        Ok(self.count_admins().await? > 0)
    }

    /// Create a new user.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO users (id, email, password_hash, is_admin) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(email)
            .bind(password_hash)
            .bind(is_admin as i32)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_admin,
        })
    }

    // ==================== AGENT OPERATIONS ====================

    /// List all agents in creation order.
    ///
    /// This ordering is what the distribution engine sees, so it must be
    /// stable across the upload and distribution reads.
    pub async fn list_agents(&self) -> Result<Vec<Agent>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, email, mobile, password_hash, lead_count, created_at FROM agents ORDER BY created_at, id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(agent_from_row).collect())
    }

    /// Find an agent by email.
    pub async fn find_agent_by_email(&self, email: &str) -> Result<Option<Agent>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, email, mobile, password_hash, lead_count, created_at FROM agents WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(agent_from_row))
    }

    /// Create a new agent.
    pub async fn create_agent(
        &self,
        request: &CreateAgentRequest,
        password_hash: &str,
    ) -> Result<Agent, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO agents (id, name, email, mobile, password_hash, lead_count, created_at) VALUES (?, ?, ?, ?, ?, 0, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.mobile)
        .bind(password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Agent {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            mobile: request.mobile.clone(),
            password_hash: password_hash.to_string(),
            lead_count: 0,
            created_at: now,
        })
    }

    /// Delete an agent.
    pub async fn delete_agent(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM agents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Agent {} not found", id)));
        }

        Ok(())
    }

    // ==================== LIST OPERATIONS ====================

    /// List all uploads, newest first.
    pub async fn list_lists(&self) -> Result<Vec<List>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, upload_date, total_leads, status FROM lists ORDER BY upload_date DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(list_from_row).collect())
    }

    /// Get a list by ID.
    pub async fn get_list(&self, id: &str) -> Result<Option<List>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, upload_date, total_leads, status FROM lists WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(list_from_row))
    }

    /// Persist a distributed list and its leads in one transaction.
    ///
    /// `assigned` holds the receiving agent for the lead at the same index.
    /// Stored lead counts of the receiving agents are refreshed inside the
    /// same transaction.
    pub async fn create_list_with_leads(
        &self,
        name: &str,
        leads: &[NewLead],
        assigned: &[&Agent],
    ) -> Result<List, AppError> {
        let list_id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO lists (id, name, upload_date, total_leads, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&list_id)
        .bind(name)
        .bind(&now)
        .bind(leads.len() as i64)
        .bind(ListStatus::Distributed.as_str())
        .execute(&mut *tx)
        .await?;

        for (lead, agent) in leads.iter().zip(assigned) {
            sqlx::query(
                "INSERT INTO leads (id, first_name, phone, notes, assigned_to, list_id) VALUES (?, ?, ?, ?, ?, ?)"
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(&lead.first_name)
            .bind(&lead.phone)
            .bind(&lead.notes)
            .bind(&agent.id)
            .bind(&list_id)
            .execute(&mut *tx)
            .await?;
        }

        let mut receiving: Vec<&str> = assigned.iter().map(|a| a.id.as_str()).collect();
        receiving.sort_unstable();
        receiving.dedup();
        for agent_id in receiving {
            refresh_lead_count(&mut tx, agent_id).await?;
        }

        tx.commit().await?;

        Ok(List {
            id: list_id,
            name: name.to_string(),
            upload_date: now,
            total_leads: leads.len() as i64,
            status: ListStatus::Distributed,
        })
    }

    /// Delete a list and all of its leads, refreshing the stored lead
    /// counts of the affected agents.
    pub async fn delete_list(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query("SELECT id FROM lists WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("List {} not found", id)));
        }

        let affected = sqlx::query("SELECT DISTINCT assigned_to FROM leads WHERE list_id = ?")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM leads WHERE list_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for row in &affected {
            let agent_id: String = row.get("assigned_to");
            refresh_lead_count(&mut tx, &agent_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // ==================== LEAD OPERATIONS ====================

    /// Leads belonging to one list, in assignment order.
    pub async fn list_leads_for_list(&self, list_id: &str) -> Result<Vec<Lead>, AppError> {
        let rows = sqlx::query(
            "SELECT id, first_name, phone, notes, assigned_to, list_id FROM leads WHERE list_id = ? ORDER BY rowid"
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(lead_from_row).collect())
    }

    /// Group one list's leads by the agent they were assigned to.
    ///
    /// Groups appear in assignment order, which is the agent enumeration
    /// order the distribution engine saw at upload time.
    pub async fn get_list_distribution(
        &self,
        list_id: &str,
    ) -> Result<Vec<AgentDistribution>, AppError> {
        let rows = sqlx::query(
            r#"SELECT l.id, l.first_name, l.phone, l.notes,
                      a.id AS agent_id, a.name AS agent_name, a.email AS agent_email
               FROM leads l
               JOIN agents a ON a.id = l.assigned_to
               WHERE l.list_id = ?
               ORDER BY l.rowid"#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        let mut groups: Vec<AgentDistribution> = Vec::new();
        for row in &rows {
            let agent_id: String = row.get("agent_id");
            let lead = LeadSummary {
                id: row.get("id"),
                first_name: row.get("first_name"),
                phone: row.get("phone"),
                notes: row.get("notes"),
            };

            if let Some(group) = groups.iter_mut().find(|g| g.agent.id == agent_id) {
                group.leads.push(lead);
            } else {
                groups.push(AgentDistribution {
                    agent: DistributionAgent {
                        id: agent_id,
                        name: row.get("agent_name"),
                        email: row.get("agent_email"),
                    },
                    leads: vec![lead],
                });
            }
        }

        Ok(groups)
    }
}

/// Recompute an agent's stored lead count from the leads table.
async fn refresh_lead_count(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    agent_id: &str,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE agents SET lead_count = (SELECT COUNT(*) FROM leads WHERE assigned_to = ?) WHERE id = ?"
    )
    .bind(agent_id)
    .bind(agent_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    let is_admin: i32 = row.get("is_admin");
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        is_admin: is_admin != 0,
    }
}

fn agent_from_row(row: &sqlx::sqlite::SqliteRow) -> Agent {
    Agent {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        mobile: row.get("mobile"),
        password_hash: row.get("password_hash"),
        lead_count: row.get("lead_count"),
        created_at: row.get("created_at"),
    }
}

fn list_from_row(row: &sqlx::sqlite::SqliteRow) -> List {
    let status: String = row.get("status");
    List {
        id: row.get("id"),
        name: row.get("name"),
        upload_date: row.get("upload_date"),
        total_leads: row.get("total_leads"),
        status: ListStatus::from_str(&status).unwrap_or(ListStatus::Uploaded),
    }
}

fn lead_from_row(row: &sqlx::sqlite::SqliteRow) -> Lead {
    Lead {
        id: row.get("id"),
        first_name: row.get("first_name"),
        phone: row.get("phone"),
        notes: row.get("notes"),
        assigned_to: row.get("assigned_to"),
        list_id: row.get("list_id"),
    }
}
