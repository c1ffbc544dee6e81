use std::cell::RefCell;
use std::rc::Rc;

use photolayouts_core::{BorderAttributes, CanvasSize, Error, ItemId, SceneError};
use photolayouts_scene::{ItemKind, Scene, SceneChange, SceneListener, SceneModel};

#[derive(Clone, Default)]
struct Recorder {
    changes: Rc<RefCell<Vec<SceneChange>>>,
}

impl SceneListener for Recorder {
    fn on_scene_changed(&self, change: &SceneChange) {
        self.changes.borrow_mut().push(change.clone());
    }
}

fn add(scene: &mut Scene, parent: Option<ItemId>, name: &str) -> ItemId {
    scene
        .append_item(parent, ItemKind::Group, name, BorderAttributes::default())
        .unwrap()
}

#[test]
fn test_listeners_receive_notifications_until_removed() {
    let mut scene = Scene::default();
    let item = add(&mut scene, None, "item");
    let recorder = Recorder::default();
    let handle = scene.add_listener(Box::new(recorder.clone()));

    scene.notify_changed(SceneChange::BorderChanged { item });
    assert_eq!(
        recorder.changes.borrow().as_slice(),
        &[SceneChange::BorderChanged { item }]
    );

    assert!(scene.remove_listener(handle));
    assert!(!scene.remove_listener(handle));
    scene.notify_changed(SceneChange::BorderChanged { item });
    assert_eq!(recorder.changes.borrow().len(), 1);
}

#[test]
fn test_insert_preserves_sibling_order() {
    let mut scene = Scene::default();
    let a = add(&mut scene, None, "a");
    let b = add(&mut scene, None, "b");
    let c = add(&mut scene, None, "c");

    scene.detach(b).unwrap();
    assert_eq!(scene.roots(), &[a, c]);
    scene.insert_at(None, 2, b).unwrap();
    assert_eq!(scene.roots(), &[a, c, b]);
    assert_eq!(scene.row_of(b).unwrap(), 2);
}

#[test]
fn test_stale_ids_after_destroy() {
    let mut scene = Scene::default();
    let item = add(&mut scene, None, "item");
    scene.detach(item).unwrap();
    scene.destroy(item).unwrap();

    let replacement = add(&mut scene, None, "replacement");
    assert_ne!(item, replacement);
    assert_eq!(
        scene.border(item).unwrap_err(),
        Error::from(SceneError::ItemNotFound { id: item })
    );
    assert!(scene.detach(item).is_err());
}

#[test]
fn test_nested_attachment_follows_ancestors() {
    let mut scene = Scene::default();
    let outer = add(&mut scene, None, "outer");
    let inner = add(&mut scene, Some(outer), "inner");
    let leaf = add(&mut scene, Some(inner), "leaf");

    assert_eq!(scene.subtree(outer).unwrap(), vec![outer, inner, leaf]);
    assert_eq!(scene.depth(leaf).unwrap(), 2);

    scene.detach(inner).unwrap();
    assert!(!scene.is_attached(leaf));
    assert_eq!(scene.parent_of(leaf).unwrap(), Some(inner));

    scene.insert_at(None, 0, inner).unwrap();
    assert!(scene.is_attached(leaf));
    assert_eq!(scene.roots(), &[inner, outer]);
}

#[test]
fn test_canvas_size_validation() {
    let mut scene = Scene::new(CanvasSize::new(100.0, 50.0));
    assert!(scene.set_canvas_size(CanvasSize::new(0.0, 10.0)).is_err());
    assert!(scene
        .set_canvas_size(CanvasSize::new(f64::INFINITY, 10.0))
        .is_err());
    assert_eq!(scene.canvas_size(), CanvasSize::new(100.0, 50.0));

    scene.set_canvas_size(CanvasSize::new(300.0, 200.0)).unwrap();
    assert_eq!(scene.snapshot().canvas_size, CanvasSize::new(300.0, 200.0));
}
