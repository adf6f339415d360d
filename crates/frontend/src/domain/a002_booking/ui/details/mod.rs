pub mod view_model;

use contracts::domain::a002_booking::aggregate::BookingStatus;
use leptos::prelude::*;

use crate::shared::date_utils::nights;
use crate::shared::modal::Modal;
use view_model::BookingDetailsViewModel;

/// Edit dialog of an existing booking, or a new booking when `id` is `None`
#[component]
pub fn BookingDetails(
    id: Option<i64>,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = BookingDetailsViewModel::new();
    vm.load(id);
    let form = vm.form;
    let editing = id.is_some();

    let title = if editing {
        format!("Booking #{}", id.unwrap_or_default())
    } else {
        "New booking".to_string()
    };

    let stay_nights = move || {
        let f = form.get();
        nights(&f.check_in_date, &f.check_out_date)
            .map(|n| format!("{} night(s)", n))
            .unwrap_or_default()
    };

    view! {
        <Modal title=title on_close=on_close>
            {move || vm.error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="bk_room_type">"Room type"</label>
                    <select
                        id="bk_room_type"
                        disabled=editing
                        prop:value=move || form.get().room_id.to_string()
                        on:change=move |ev| {
                            let room_id = event_target_value(&ev).parse().unwrap_or_default();
                            form.update(|f| f.room_id = room_id);
                        }
                    >
                        {move || vm.room_types.get().into_iter().map(|rt| {
                            let value = rt.id.to_string();
                            view! { <option value=value>{rt.name}</option> }
                        }).collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="bk_room_no">"Room number"</label>
                    <input
                        type="text"
                        id="bk_room_no"
                        prop:value=move || vm.room_no_text.get()
                        on:input=move |ev| vm.room_no_text.set(event_target_value(&ev))
                    />
                    <small class="form-hint">
                        {move || {
                            let rooms = vm.declared_rooms();
                            if rooms.is_empty() {
                                "No room numbers declared for this type".to_string()
                            } else {
                                let list: Vec<String> = rooms.iter().map(|n| n.to_string()).collect();
                                format!("Rooms: {}", list.join(", "))
                            }
                        }}
                    </small>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="bk_check_in">"Check-in"</label>
                        <input
                            type="date"
                            id="bk_check_in"
                            prop:value=move || form.get().check_in_date
                            on:input=move |ev| form.update(|f| f.check_in_date = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="bk_check_out">"Check-out"</label>
                        <input
                            type="date"
                            id="bk_check_out"
                            prop:value=move || form.get().check_out_date
                            on:input=move |ev| form.update(|f| f.check_out_date = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group form-group--static">
                        <span>{stay_nights}</span>
                    </div>
                </div>

                <div class="form-group">
                    <label for="bk_guest">"Guest name"</label>
                    <input
                        type="text"
                        id="bk_guest"
                        prop:value=move || form.get().user_name
                        on:input=move |ev| form.update(|f| f.user_name = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="bk_email">"Email"</label>
                    <input
                        type="email"
                        id="bk_email"
                        prop:value=move || form.get().email
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </div>

                <Show when=move || editing>
                    <div class="form-group">
                        <label for="bk_status">"Status"</label>
                        <select
                            id="bk_status"
                            prop:value=move || form.get().status
                            on:change=move |ev| form.update(|f| f.status = event_target_value(&ev))
                        >
                            <option value={BookingStatus::CONFIRMED}>"Confirmed"</option>
                            <option value={BookingStatus::CANCELLED}>"Cancelled"</option>
                        </select>
                    </div>
                </Show>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || vm.saving.get()
                    on:click=move |_| vm.save_command(on_saved)
                >
                    {move || if vm.is_edit_mode() { "Save" } else { "Book" }}
                </button>
                <button class="button button--secondary" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
            </div>
        </Modal>
    }
}
