//! Kanban Board
//!
//! Four ordered buckets of tasks. A transfer removes the task from the bucket
//! it was dragged out of and appends it to the destination.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TransferError, ValidationError};
use crate::models::{Attachment, BoardChip, Bucket, Label, LabelColor, Priority, Task, UserAvatar};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    buckets: [Vec<Task>; 4],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self, bucket: Bucket) -> &[Task] {
        &self.buckets[bucket.index()]
    }

    /// Total tasks across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bucket_of(&self, task_id: u64) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .find(|bucket| self.tasks(*bucket).iter().any(|t| t.id == task_id))
    }

    pub fn find(&self, task_id: u64) -> Option<(&Task, Bucket)> {
        Bucket::ALL.into_iter().find_map(|bucket| {
            self.tasks(bucket).iter().find(|t| t.id == task_id).map(|t| (t, bucket))
        })
    }

    fn find_mut(&mut self, task_id: u64) -> Option<&mut Task> {
        self.buckets.iter_mut().flatten().find(|t| t.id == task_id)
    }

    /// Append a new task to `bucket`. The title must not be blank.
    pub fn add_task(
        &mut self,
        bucket: Bucket,
        id: u64,
        title: &str,
        priority: Priority,
        today: NaiveDate,
    ) -> Result<&Task, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Required("title"));
        }
        let list = &mut self.buckets[bucket.index()];
        list.push(Task {
            id,
            title: title.to_string(),
            description: String::new(),
            priority,
            due_date: today,
            labels: Vec::new(),
            assigned_users: Vec::new(),
            attachments: Vec::new(),
        });
        Ok(&list[list.len() - 1])
    }

    /// Full replace wherever the task lives; false if it is not on the board
    pub fn update_task(&mut self, updated: Task) -> bool {
        match self.find_mut(updated.id) {
            Some(task) => {
                *task = updated;
                true
            }
            None => false,
        }
    }

    /// Apply `edit` to the task in place; false if it is not on the board
    pub fn edit_task<F: FnOnce(&mut Task)>(&mut self, task_id: u64, edit: F) -> bool {
        match self.find_mut(task_id) {
            Some(task) => {
                edit(task);
                true
            }
            None => false,
        }
    }

    pub fn delete_task(&mut self, task_id: u64) -> Option<Task> {
        for list in self.buckets.iter_mut() {
            if let Some(index) = list.iter().position(|t| t.id == task_id) {
                return Some(list.remove(index));
            }
        }
        None
    }

    /// Move `task_id` from `from` to the end of `to`.
    ///
    /// Same-bucket transfers do nothing. A task that is not in `from` is an
    /// error and the board is left as it was.
    pub fn transfer(&mut self, task_id: u64, from: Bucket, to: Bucket) -> Result<(), TransferError> {
        let source = &self.buckets[from.index()];
        let Some(index) = source.iter().position(|t| t.id == task_id) else {
            return Err(TransferError::NotInBucket { task_id, bucket: from });
        };
        if from == to {
            return Ok(());
        }
        let task = self.buckets[from.index()].remove(index);
        self.buckets[to.index()].push(task);
        Ok(())
    }

    pub fn add_attachment(&mut self, task_id: u64, attachment: Attachment) -> bool {
        match self.find_mut(task_id) {
            Some(task) => {
                task.attachments.push(attachment);
                true
            }
            None => false,
        }
    }

    pub fn remove_attachment(&mut self, task_id: u64, attachment_id: u64) -> Option<Attachment> {
        let task = self.find_mut(task_id)?;
        let index = task.attachments.iter().position(|a| a.id == attachment_id)?;
        Some(task.attachments.remove(index))
    }
}

// ========================
// Chips
// ========================

pub fn label_palette() -> Vec<Label> {
    [
        ("l1", "Diseño", LabelColor::Purple),
        ("l2", "Backend", LabelColor::Blue),
        ("l3", "DevOps", LabelColor::Yellow),
        ("l4", "Seguridad", LabelColor::Green),
        ("l5", "Frontend", LabelColor::Purple),
        ("l6", "Arquitectura", LabelColor::Yellow),
        ("l7", "Planificación", LabelColor::Green),
    ]
    .into_iter()
    .map(|(id, name, color)| Label { id: id.to_string(), name: name.to_string(), color })
    .collect()
}

pub fn team_palette() -> Vec<UserAvatar> {
    [("u1", "JD"), ("u2", "AS"), ("u3", "MR")]
        .into_iter()
        .map(|(id, initials)| UserAvatar { id: id.to_string(), initials: initials.to_string() })
        .collect()
}

/// Chips not yet on the task, labels first
pub fn available_chips(task: &Task) -> Vec<BoardChip> {
    let labels = label_palette()
        .into_iter()
        .filter(|l| !task.labels.iter().any(|have| have.id == l.id))
        .map(BoardChip::Label);
    let users = team_palette()
        .into_iter()
        .filter(|u| !task.assigned_users.iter().any(|have| have.id == u.id))
        .map(BoardChip::User);
    labels.chain(users).collect()
}

/// Add the chip if absent, remove it if present
pub fn toggle_chip(task: &mut Task, chip: BoardChip) {
    match chip {
        BoardChip::Label(label) => match task.labels.iter().position(|l| l.id == label.id) {
            Some(index) => {
                task.labels.remove(index);
            }
            None => task.labels.push(label),
        },
        BoardChip::User(user) => match task.assigned_users.iter().position(|u| u.id == user.id) {
            Some(index) => {
                task.assigned_users.remove(index);
            }
            None => task.assigned_users.push(user),
        },
    }
}

// ========================
// Seed
// ========================

fn seed_task(id: u64, title: &str, description: &str, priority: Priority, due: (i32, u32, u32), labels: &[&str], users: &[&str]) -> Task {
    let palette = label_palette();
    let team = team_palette();
    Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        priority,
        due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap_or_default(),
        labels: palette.into_iter().filter(|l| labels.contains(&l.id.as_str())).collect(),
        assigned_users: users
            .iter()
            .filter_map(|id| team.iter().find(|u| u.id == *id).cloned())
            .collect(),
        attachments: Vec::new(),
    }
}

pub fn seed_board() -> Board {
    let mut board = Board::new();
    board.buckets[Bucket::Todo.index()] = vec![
        seed_task(1, "Diseñar interfaz de usuario", "Crear mockups y prototipos de alta fidelidad para la nueva plataforma.", Priority::Alta, (2024, 9, 23), &["l1"], &["u1", "u2"]),
        seed_task(2, "Configurar base de datos", "Instalar y configurar la base de datos PostgreSQL en el servidor de desarrollo.", Priority::Media, (2024, 9, 25), &["l2"], &["u3"]),
        seed_task(3, "Investigar tecnologías de despliegue", "Analizar opciones como Docker, Kubernetes y Vercel para el despliegue de la aplicación.", Priority::Baja, (2024, 9, 30), &["l3"], &["u1"]),
    ];
    board.buckets[Bucket::InProgress.index()] = vec![
        seed_task(4, "Desarrollar módulo de autenticación", "Implementar el registro de usuarios, inicio de sesión y gestión de tokens JWT.", Priority::Alta, (2024, 9, 28), &["l2", "l4"], &["u3", "u2"]),
        seed_task(5, "Crear componentes UI reutilizables", "Desarrollar componentes base como botones, modales y tarjetas.", Priority::Media, (2024, 9, 26), &["l5"], &["u1"]),
    ];
    board.buckets[Bucket::Review.index()] = vec![
        seed_task(6, "Revisar arquitectura del sistema", "Validar el diseño de la arquitectura de microservicios propuesta.", Priority::Media, (2024, 9, 27), &["l6"], &["u3", "u1"]),
    ];
    board.buckets[Bucket::Done.index()] = vec![
        seed_task(7, "Definir requisitos del proyecto", "Documentar los requerimientos funcionales y no funcionales del proyecto.", Priority::Baja, (2024, 9, 15), &["l7"], &["u1", "u3"]),
    ];
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(board: &Board) -> Vec<usize> {
        Bucket::ALL.iter().map(|b| board.tasks(*b).len()).collect()
    }

    #[test]
    fn test_seed_layout() {
        let board = seed_board();
        assert_eq!(counts(&board), vec![3, 2, 1, 1]);
        assert_eq!(board.len(), 7);
        let (task, bucket) = board.find(4).unwrap();
        assert_eq!(bucket, Bucket::InProgress);
        assert_eq!(task.labels.len(), 2);
        assert_eq!(task.assigned_users[0].initials, "MR");
    }

    #[test]
    fn test_edit_task_in_place() {
        let mut board = seed_board();
        assert!(board.edit_task(4, |task| task.title.push_str(" (rev)")));
        let (task, bucket) = board.find(4).unwrap();
        assert!(task.title.ends_with(" (rev)"));
        assert_eq!(bucket, Bucket::InProgress);
        assert_eq!(board.len(), 7);

        assert!(!board.edit_task(999, |task| task.title.clear()));
    }

    #[test]
    fn test_transfer_moves_to_end() {
        let mut board = seed_board();
        board.transfer(1, Bucket::Todo, Bucket::Review).unwrap();

        assert_eq!(counts(&board), vec![2, 2, 2, 1]);
        assert_eq!(board.len(), 7);
        assert_eq!(board.bucket_of(1), Some(Bucket::Review));
        assert_eq!(board.tasks(Bucket::Review).last().map(|t| t.id), Some(1));
        assert_eq!(board.tasks(Bucket::Todo).iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_transfer_backwards() {
        let mut board = seed_board();
        board.transfer(7, Bucket::Done, Bucket::Todo).unwrap();
        assert_eq!(board.bucket_of(7), Some(Bucket::Todo));
        assert_eq!(board.len(), 7);
    }

    #[test]
    fn test_transfer_same_bucket_is_noop() {
        let mut board = seed_board();
        let before = board.clone();
        board.transfer(2, Bucket::Todo, Bucket::Todo).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_transfer_from_wrong_bucket_changes_nothing() {
        let mut board = seed_board();
        let before = board.clone();

        let err = board.transfer(6, Bucket::Todo, Bucket::Done).unwrap_err();
        assert_eq!(err, TransferError::NotInBucket { task_id: 6, bucket: Bucket::Todo });
        assert!(board.transfer(999, Bucket::Review, Bucket::Done).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_add_requires_title() {
        let mut board = Board::new();
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(
            board.add_task(Bucket::Todo, 1, "   ", Priority::Media, today).unwrap_err(),
            ValidationError::Required("title")
        );
        let task = board.add_task(Bucket::Review, 2, " Calibrar ", Priority::Alta, today).unwrap();
        assert_eq!(task.title, "Calibrar");
        assert_eq!(task.due_date, today);
        assert_eq!(board.bucket_of(2), Some(Bucket::Review));
    }

    #[test]
    fn test_update_and_delete() {
        let mut board = seed_board();
        let mut task = board.find(5).unwrap().0.clone();
        task.priority = Priority::Alta;
        task.description = "listo".to_string();
        assert!(board.update_task(task.clone()));
        assert_eq!(board.find(5).unwrap().0, &task);

        let mut ghost = task.clone();
        ghost.id = 404;
        assert!(!board.update_task(ghost));

        assert_eq!(board.delete_task(5).map(|t| t.id), Some(5));
        assert!(board.delete_task(5).is_none());
        assert_eq!(board.len(), 6);
    }

    #[test]
    fn test_attachments() {
        let mut board = seed_board();
        let att = Attachment::from_bytes(100, "foto.png", "image/png", &[1, 2, 3]);
        assert!(board.add_attachment(3, att.clone()));
        assert!(!board.add_attachment(404, att.clone()));
        assert_eq!(board.find(3).unwrap().0.attachments, vec![att]);

        assert!(board.remove_attachment(3, 101).is_none());
        assert_eq!(board.remove_attachment(3, 100).map(|a| a.id), Some(100));
        assert!(board.find(3).unwrap().0.attachments.is_empty());
    }

    #[test]
    fn test_toggle_chip() {
        let mut task = seed_task(1, "t", "", Priority::Baja, (2024, 1, 1), &["l1"], &[]);
        let design = label_palette().remove(0);
        let available = available_chips(&task);
        assert!(!available.contains(&BoardChip::Label(design.clone())));
        assert!(available.iter().any(|c| matches!(c, BoardChip::User(u) if u.id == "u2")));

        toggle_chip(&mut task, BoardChip::Label(design));
        assert!(task.labels.is_empty());
        toggle_chip(&mut task, BoardChip::User(team_palette().remove(1)));
        assert_eq!(task.assigned_users[0].initials, "AS");
    }
}
