//! Unit tests for ns-storage.

#[cfg(test)]
mod queue {
    use ns_core::{PackageId, PackageIds};

    use crate::{PackageQueue, PackageStockpile, Queue, QueueKind, StorageError};

    fn filled(kind: QueueKind, ids: &PackageIds, n: usize) -> Queue {
        let mut q = Queue::new(kind);
        for _ in 0..n {
            q.push(ids.create());
        }
        q
    }

    #[test]
    fn fifo_pops_earliest() {
        let ids = PackageIds::new();
        let mut q = filled(QueueKind::Fifo, &ids, 3);
        assert_eq!(q.pop().unwrap().id(), PackageId(1));
        assert_eq!(q.pop().unwrap().id(), PackageId(2));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn lifo_pops_latest() {
        let ids = PackageIds::new();
        let mut q = filled(QueueKind::Lifo, &ids, 3);
        let first = q.pop().unwrap();
        let second = q.pop().unwrap();
        assert_eq!(first.id(), PackageId(3));
        assert_eq!(second.id(), PackageId(2));
    }

    #[test]
    fn iteration_is_insertion_order_for_both_disciplines() {
        let ids = PackageIds::new();
        for kind in [QueueKind::Fifo, QueueKind::Lifo] {
            let q = filled(kind, &ids, 3);
            let seen: Vec<u32> = q.iter().map(|p| p.id().0).collect();
            let mut sorted = seen.clone();
            sorted.sort_unstable();
            assert_eq!(seen, sorted, "{kind} iteration out of order");
        }
    }

    #[test]
    fn pop_on_empty_is_error() {
        let mut q = Queue::lifo();
        assert!(q.is_empty());
        match q.pop() {
            Err(StorageError::EmptyQueue { kind }) => assert_eq!(kind, QueueKind::Lifo),
            other => panic!("expected EmptyQueue, got {other:?}"),
        }
    }

    #[test]
    fn popped_package_keeps_its_id_until_dropped() {
        let ids = PackageIds::new();
        let mut q = filled(QueueKind::Fifo, &ids, 2);
        let p = q.pop().unwrap();
        assert!(ids.is_assigned(p.id()));
        drop(p);
        assert!(!ids.is_assigned(PackageId(1)));
    }

    #[test]
    fn discipline_is_inspectable() {
        assert_eq!(Queue::fifo().queue_kind(), QueueKind::Fifo);
        assert_eq!(Queue::lifo().queue_kind(), QueueKind::Lifo);
        assert_eq!(Queue::default().queue_kind(), QueueKind::Fifo);
    }

    #[test]
    fn usable_through_trait_objects() {
        let ids = PackageIds::new();
        let mut stock: Box<dyn PackageStockpile> = Box::new(Queue::fifo());
        stock.push(ids.create());
        assert_eq!(stock.len(), 1);

        let mut queue: Box<dyn PackageQueue> = Box::new(Queue::lifo());
        queue.push(ids.create());
        assert_eq!(queue.pop().unwrap().id(), PackageId(2));
    }
}

#[cfg(test)]
mod kind {
    use crate::{QueueKind, StorageError};

    #[test]
    fn labels() {
        assert_eq!(QueueKind::Fifo.to_string(), "FIFO");
        assert_eq!(QueueKind::Lifo.as_str(), "LIFO");
    }

    #[test]
    fn parse() {
        assert_eq!("FIFO".parse::<QueueKind>().unwrap(), QueueKind::Fifo);
        assert_eq!("LIFO".parse::<QueueKind>().unwrap(), QueueKind::Lifo);
        assert!(matches!(
            "fifo".parse::<QueueKind>(),
            Err(StorageError::UnknownQueueKind(s)) if s == "fifo"
        ));
    }
}
